#![deny(missing_docs)]

//! # Reference Resolution
//!
//! Turns a raw API description plus any file or remote references into a single
//! self-contained tree.
//!
//! True cycles are broken by leaving the `$ref` object in place at the point the
//! cycle closes; the normalizer maps that marker to `SchemaKind::Reference`.

use crate::error::{AppError, AppResult};
use crate::oas::document::{fetch_document, read_document};
use crate::oas::ref_utils::{parse_reference, resolve_pointer, ReferenceKind};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use url::Url;

/// Where an API description comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiSource {
    /// A YAML or JSON file on disk.
    Path(PathBuf),
    /// An already-parsed document. Relative references cannot be followed.
    Value(Value),
    /// A remote document, fetched over HTTP(S).
    Url(String),
}

/// Produces a fully dereferenced document.
pub trait Resolver {
    /// Resolves `source` into one self-contained tree.
    fn resolve(&self, source: &ApiSource) -> AppResult<Value>;
}

/// Resolver for files, in-memory documents and HTTP(S) URLs.
///
/// Relative references are joined onto the URL of the referencing document,
/// so a remote document may point at its siblings the same way a file does.
/// Fetching needs the `client` feature; without it remote documents fail with
/// [`AppError::Resolution`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultResolver;

impl Resolver for DefaultResolver {
    fn resolve(&self, source: &ApiSource) -> AppResult<Value> {
        let mut deref = Dereferencer::default();

        let scope = match source {
            ApiSource::Path(path) => {
                let root = read_document(path)?;
                let base = file_url(path)?;
                deref.cache(base, root)
            }
            ApiSource::Value(value) => Scope {
                root: Rc::new(value.clone()),
                base: None,
            },
            ApiSource::Url(raw) => {
                let url = Url::parse(raw).map_err(|e| {
                    AppError::Resolution(format!("Invalid document URL '{}': {}", raw, e))
                })?;
                let root = deref.load(&url)?;
                Scope {
                    root,
                    base: Some(url),
                }
            }
        };

        let mut stack = Vec::new();
        deref.walk(&scope.root, &scope, &mut stack)
    }
}

fn file_url(path: &Path) -> AppResult<Url> {
    let absolute = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    Url::from_file_path(&absolute).map_err(|()| {
        AppError::Resolution(format!("Cannot address {} as a URL", absolute.display()))
    })
}

/// A document being walked and the URL its relative references resolve against.
#[derive(Debug, Clone)]
struct Scope {
    root: Rc<Value>,
    base: Option<Url>,
}

/// Absolute URL of the document a non-local reference points into.
fn document_url(kind: ReferenceKind, document: &str, scope: &Scope, ref_str: &str) -> AppResult<Url> {
    let joined = match (kind, &scope.base) {
        (ReferenceKind::Remote, _) => Url::parse(document),
        (_, Some(base)) => base.join(document),
        (_, None) => {
            return Err(AppError::Resolution(format!(
                "Cannot follow reference '{}' without a base document location",
                ref_str
            )))
        }
    };
    joined.map_err(|e| AppError::Resolution(format!("Invalid reference '{}': {}", ref_str, e)))
}

#[derive(Default)]
struct Dereferencer {
    documents: HashMap<Url, Rc<Value>>,
}

impl Dereferencer {
    /// Copies `value`, replacing every `$ref` by its (recursively resolved) target.
    ///
    /// `stack` holds the identities of the references currently being expanded.
    fn walk(&mut self, value: &Value, scope: &Scope, stack: &mut Vec<String>) -> AppResult<Value> {
        match value {
            Value::Object(map) => {
                if let Some(Value::String(ref_str)) = map.get("$ref") {
                    return self.follow(ref_str, scope, stack);
                }
                let mut out = Map::with_capacity(map.len());
                for (key, v) in map {
                    out.insert(key.clone(), self.walk(v, scope, stack)?);
                }
                Ok(Value::Object(out))
            }
            Value::Array(items) => Ok(Value::Array(
                items
                    .iter()
                    .map(|v| self.walk(v, scope, stack))
                    .collect::<AppResult<Vec<_>>>()?,
            )),
            other => Ok(other.clone()),
        }
    }

    fn follow(&mut self, ref_str: &str, scope: &Scope, stack: &mut Vec<String>) -> AppResult<Value> {
        let parsed = parse_reference(ref_str);

        let target_scope = match parsed.kind {
            ReferenceKind::Local => scope.clone(),
            ReferenceKind::Remote | ReferenceKind::Relative => {
                let url = document_url(parsed.kind, parsed.document, scope, ref_str)?;
                let root = self.load(&url)?;
                Scope {
                    root,
                    base: Some(url),
                }
            }
        };

        let identity = format!(
            "{}#{}",
            target_scope.base.as_ref().map(Url::as_str).unwrap_or_default(),
            parsed.fragment
        );

        if stack.contains(&identity) {
            let mut marker = Map::new();
            marker.insert("$ref".to_string(), Value::String(ref_str.to_string()));
            return Ok(Value::Object(marker));
        }

        let target = resolve_pointer(&target_scope.root, parsed.fragment)
            .ok_or_else(|| AppError::Resolution(format!("Unresolvable reference: {}", ref_str)))?;

        stack.push(identity);
        let resolved = self.walk(target, &target_scope, stack);
        stack.pop();
        resolved
    }

    /// Returns the parsed document at `url`, reading or fetching it on first use.
    fn load(&mut self, url: &Url) -> AppResult<Rc<Value>> {
        if let Some(doc) = self.documents.get(url) {
            return Ok(Rc::clone(doc));
        }

        let doc = match url.scheme() {
            "file" => {
                let path = url.to_file_path().map_err(|()| {
                    AppError::Resolution(format!("Not a local file URL: {}", url))
                })?;
                read_document(&path)?
            }
            "http" | "https" => fetch_document(url)?,
            other => {
                return Err(AppError::Resolution(format!(
                    "Unsupported URL scheme '{}' in {}",
                    other, url
                )))
            }
        };

        Ok(self.cache(url.clone(), doc).root)
    }

    fn cache(&mut self, url: Url, doc: Value) -> Scope {
        let root = Rc::new(doc);
        self.documents.insert(url.clone(), Rc::clone(&root));
        Scope {
            root,
            base: Some(url),
        }
    }
}
