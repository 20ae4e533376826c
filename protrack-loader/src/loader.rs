use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde_json::Value;

use crate::errors::{LoaderError, LoaderResult};

/// Fetches one raw payload.
pub trait Loader: Send + Sync {
    fn load(&self, url: &str) -> LoaderResult<Value>;
}

///
/// Loads JSON over HTTP. Every request is bounded by the agent's timeout;
/// a request that runs out of time fails on its own without affecting
/// requests made in parallel.
///
#[derive(Clone)]
pub struct HttpLoader {
    agent: ureq::Agent,
}

impl HttpLoader {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        HttpLoader { agent }
    }
}

impl Loader for HttpLoader {
    fn load(&self, url: &str) -> LoaderResult<Value> {
        let response = self
            .agent
            .get(url)
            .set("Accept", "application/json")
            .call()
            .map_err(|e| LoaderError::Http {
                url: url.to_string(),
                source: Box::new(e),
            })?;

        // into_string refuses bodies over 10 MB
        serde_json::from_reader(BufReader::new(response.into_reader())).map_err(|e| {
            LoaderError::Json {
                location: url.to_string(),
                source: e,
            }
        })
    }
}

/// Where a source's payload comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    /// URL template containing `{accession}`.
    Remote(String),
    /// A JSON file on disk, the same for every accession.
    Local(PathBuf),
}

pub(crate) fn read_local(path: &Path) -> LoaderResult<Value> {
    let location = path.display().to_string();
    let file = File::open(path).map_err(|e| LoaderError::Read {
        location: location.clone(),
        source: e,
    })?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| LoaderError::Json { location, source: e })
}
