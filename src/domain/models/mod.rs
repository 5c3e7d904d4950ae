pub mod agent_file;
pub mod config;
pub mod description;
pub mod exclusion;
pub mod frontmatter;
pub mod manifest;
pub mod name_map;

pub use agent_file::{
    compose_document, AgentFile, ComposedDocument, FrontmatterPolicy, RenderAction,
    RenderSettings,
};
pub use config::{Config, LoggingConfig};
pub use description::{
    describe, extract_description, DescriptionSource, ExtractedDescription,
    DEFAULT_MAX_DESCRIPTION_CHARS, FALLBACK_DESCRIPTION,
};
pub use exclusion::{ExclusionList, DEFAULT_EXCLUSIONS, EXCLUSION_LIST_VERSION};
pub use frontmatter::{split_frontmatter, ExistingFrontmatter, Frontmatter, SplitDocument};
pub use manifest::{Manifest, ManifestEntry, MANIFEST_FILE_NAME};
pub use name_map::{NameMap, DEFAULT_NAME_MAP};
