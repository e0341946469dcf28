//! Localization resolver: dictionaries, merge and key lookup.
/// Dictionary file discovery and coverage
mod catalog;
/// Dictionary type and merge
mod dictionary;
/// Resolution of a translator for a locale and namespaces
mod resolver;
/// Dictionary sources
mod source;
/// Translation function
mod translator;

pub use catalog::{
    Catalog,
    CatalogError,
    Coverage,
};
pub use dictionary::Dictionary;
pub use resolver::{
    LoadEntry,
    LoadReport,
    LoadStatus,
    Resolution,
    Resolver,
};
pub use source::{
    DictionarySource,
    FsSource,
    LoadError,
    MemorySource,
};
pub use translator::{
    Translator,
    Vars,
};
