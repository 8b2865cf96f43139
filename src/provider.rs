//! Symbol providers
//!
//! The outline never extracts symbols itself. A [`SymbolProvider`] hands it a
//! flat list per document; calls run on a worker thread, so implementations
//! may block.

use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

use crate::model::DocumentId;
use crate::outline::SymbolRecord;

/// Errors a symbol provider can report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The symbol source couldn't be read
    Io(String),
    /// The symbol source was read but isn't a valid symbol list
    Parse(String),
    /// The provider has nothing for this document
    Unavailable(String),
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderError::Io(e) => write!(f, "IO error: {}", e),
            ProviderError::Parse(e) => write!(f, "Parse error: {}", e),
            ProviderError::Unavailable(d) => write!(f, "No symbols available for {}", d),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Source of flat symbol lists
pub trait SymbolProvider: Send + Sync {
    /// Symbols declared in `document`; an empty list is a valid answer
    fn symbols(&self, document: &DocumentId) -> Result<Vec<SymbolRecord>, ProviderError>;
}

/// Reads symbol lists from files, treating the document id as a path
///
/// `.json` files are parsed as JSON, anything else as YAML.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSymbolProvider;

impl SymbolProvider for FileSymbolProvider {
    fn symbols(&self, document: &DocumentId) -> Result<Vec<SymbolRecord>, ProviderError> {
        load_symbols_file(document.as_path())
    }
}

/// Load a symbol list from a `.json`, `.yaml` or `.yml` file
pub fn load_symbols_file(path: &Path) -> Result<Vec<SymbolRecord>, ProviderError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ProviderError::Io(format!("{}: {}", path.display(), e)))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let symbols: Vec<SymbolRecord> = if is_json {
        serde_json::from_str(&content).map_err(|e| ProviderError::Parse(e.to_string()))?
    } else if content.trim().is_empty() {
        Vec::new()
    } else {
        serde_yaml::from_str(&content).map_err(|e| ProviderError::Parse(e.to_string()))?
    };

    tracing::debug!("Loaded {} symbols from {}", symbols.len(), path.display());
    Ok(symbols)
}

/// Symbol lists held in memory, for hosts that already have them
#[derive(Debug, Default)]
pub struct InMemoryProvider {
    documents: RwLock<HashMap<DocumentId, Vec<SymbolRecord>>>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the symbols known for `document`
    pub fn set(&self, document: DocumentId, symbols: Vec<SymbolRecord>) {
        match self.documents.write() {
            Ok(mut documents) => {
                documents.insert(document, symbols);
            }
            Err(poisoned) => {
                poisoned.into_inner().insert(document, symbols);
            }
        }
    }

    /// Forget `document`; later fetches report it unavailable
    pub fn remove(&self, document: &DocumentId) {
        match self.documents.write() {
            Ok(mut documents) => {
                documents.remove(document);
            }
            Err(poisoned) => {
                poisoned.into_inner().remove(document);
            }
        }
    }
}

impl SymbolProvider for InMemoryProvider {
    fn symbols(&self, document: &DocumentId) -> Result<Vec<SymbolRecord>, ProviderError> {
        let documents = match self.documents.read() {
            Ok(documents) => documents,
            Err(poisoned) => poisoned.into_inner(),
        };
        documents
            .get(document)
            .cloned()
            .ok_or_else(|| ProviderError::Unavailable(document.to_string()))
    }
}
