// src/client/resource.rs
//
// Generic, cached resource client. One instance per entity type; the
// entity contributes only its endpoint path, its dependent cache keys and
// its (de)serializable shape.

use crate::client::payload::{parse_item, parse_list};
use crate::client::ClientError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::rc::Rc;

/// How a front end actually talks to the server. Injected so the whole
/// client layer is testable without a network.
pub trait Transport {
    fn get(&mut self, path_and_query: &str) -> Result<String, ClientError>;
    fn post(&mut self, path: &str, body: &Value) -> Result<String, ClientError>;
    fn put(&mut self, path: &str, body: &Value) -> Result<String, ClientError>;
    fn delete(&mut self, path: &str) -> Result<String, ClientError>;
}

/// Version counters per cache key, shared by every client so a mutation on
/// one resource can invalidate another resource's reads.
#[derive(Debug, Default)]
pub struct CacheRegistry {
    versions: HashMap<String, u64>,
}

impl CacheRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(&self, key: &str) -> u64 {
        self.versions.get(key).copied().unwrap_or(0)
    }

    pub fn invalidate(&mut self, key: &str) {
        *self.versions.entry(key.to_string()).or_insert(0) += 1;
    }
}

pub type SharedRegistry = Rc<RefCell<CacheRegistry>>;

#[derive(Debug, Clone)]
pub struct ResourceSpec {
    /// Endpoint path, e.g. `/api/admin/scholarships`.
    pub path: &'static str,
    /// Cache keys of other resources a mutation here must also invalidate.
    pub dependents: &'static [&'static str],
}

struct CachedBody {
    version: u64,
    body: String,
}

pub struct ResourceClient<T, X: Transport> {
    spec: ResourceSpec,
    transport: X,
    registry: SharedRegistry,
    // List bodies keyed by query string; every filtered variant shares the
    // resource's version counter, so one invalidation stales them all.
    lists: HashMap<String, CachedBody>,
    items: HashMap<i64, CachedBody>,
    list_fetches: u64,
    pending: bool,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned, X: Transport> ResourceClient<T, X> {
    pub fn new(spec: ResourceSpec, transport: X, registry: SharedRegistry) -> Self {
        Self {
            spec,
            transport,
            registry,
            lists: HashMap::new(),
            items: HashMap::new(),
            list_fetches: 0,
            pending: false,
            _marker: PhantomData,
        }
    }

    fn item_key(&self, id: i64) -> String {
        format!("{}/{}", self.spec.path, id)
    }

    /// Number of list requests that actually hit the transport; cache hits
    /// don't count. Lets tests assert staleness without sleeping.
    pub fn list_fetch_count(&self) -> u64 {
        self.list_fetches
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn transport_ref(&self) -> &X {
        &self.transport
    }

    /// Cached list read. `query` is the raw query string ("" for none).
    pub fn list(&mut self, query: &str) -> Result<Vec<T>, ClientError> {
        let current = self.registry.borrow().version(self.spec.path);
        if let Some(cached) = self.lists.get(query) {
            if cached.version == current {
                return parse_list(&cached.body);
            }
        }

        let url = if query.is_empty() {
            self.spec.path.to_string()
        } else {
            format!("{}?{}", self.spec.path, query)
        };
        let body = self.transport.get(&url)?;
        self.list_fetches += 1;
        let items = parse_list(&body)?;
        self.lists.insert(
            query.to_string(),
            CachedBody {
                version: current,
                body,
            },
        );
        Ok(items)
    }

    /// Manual refresh action: drop the cached variant and re-fetch.
    pub fn refresh(&mut self, query: &str) -> Result<Vec<T>, ClientError> {
        self.registry.borrow_mut().invalidate(self.spec.path);
        self.list(query)
    }

    pub fn get(&mut self, id: i64) -> Result<T, ClientError> {
        let key = self.item_key(id);
        let current = self.registry.borrow().version(&key);
        if let Some(cached) = self.items.get(&id) {
            if cached.version == current {
                return parse_item(&cached.body);
            }
        }

        let body = self.transport.get(&key)?;
        let item = parse_item(&body)?;
        self.items.insert(
            id,
            CachedBody {
                version: current,
                body,
            },
        );
        Ok(item)
    }

    /// Marks a mutation in flight; the UI's submit control calls this when
    /// the request is dispatched and a second submission is rejected until
    /// `finish_mutation` runs.
    pub fn begin_mutation(&mut self) -> Result<(), ClientError> {
        if self.pending {
            return Err(ClientError::MutationInFlight);
        }
        self.pending = true;
        Ok(())
    }

    pub fn finish_mutation(&mut self) {
        self.pending = false;
    }

    fn invalidate_after_mutation(&mut self, id: Option<i64>) {
        let mut registry = self.registry.borrow_mut();
        registry.invalidate(self.spec.path);
        if let Some(id) = id {
            registry.invalidate(&format!("{}/{}", self.spec.path, id));
        }
        for dep in self.spec.dependents {
            registry.invalidate(dep);
        }
    }

    pub fn create(&mut self, input: &Value) -> Result<T, ClientError> {
        self.begin_mutation()?;
        let result = self.transport.post(self.spec.path, input);
        self.finish_mutation();
        let body = result?;
        let item = parse_item(&body)?;
        self.invalidate_after_mutation(None);
        Ok(item)
    }

    pub fn update(&mut self, id: i64, input: &Value) -> Result<T, ClientError> {
        self.begin_mutation()?;
        let path = self.item_key(id);
        let result = self.transport.put(&path, input);
        self.finish_mutation();
        let body = result?;
        let item = parse_item(&body)?;
        self.invalidate_after_mutation(Some(id));
        Ok(item)
    }

    // Deletion is only reachable through DeleteFlow, which owns the
    // confirmation step.
    pub(crate) fn delete_confirmed(&mut self, id: i64) -> Result<(), ClientError> {
        self.begin_mutation()?;
        let path = self.item_key(id);
        let result = self.transport.delete(&path);
        self.finish_mutation();
        let body = result?;
        parse_item::<Value>(&body)?;
        self.invalidate_after_mutation(Some(id));
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Records every call and answers from a scripted queue (last response
    /// repeats once the queue drains).
    #[derive(Default)]
    pub struct FakeTransport {
        pub calls: Vec<(String, String)>,
        pub responses: Vec<String>,
    }

    impl FakeTransport {
        pub fn answering(response: &str) -> Self {
            Self {
                calls: Vec::new(),
                responses: vec![response.to_string()],
            }
        }

        fn answer(&mut self, method: &str, path: &str) -> Result<String, ClientError> {
            self.calls.push((method.to_string(), path.to_string()));
            if self.responses.len() > 1 {
                Ok(self.responses.remove(0))
            } else {
                self.responses
                    .first()
                    .cloned()
                    .ok_or_else(|| ClientError::Transport("no scripted response".into()))
            }
        }

        pub fn requests_for(&self, method: &str) -> usize {
            self.calls.iter().filter(|(m, _)| m == method).count()
        }
    }

    impl Transport for FakeTransport {
        fn get(&mut self, path: &str) -> Result<String, ClientError> {
            self.answer("GET", path)
        }
        fn post(&mut self, path: &str, _body: &Value) -> Result<String, ClientError> {
            self.answer("POST", path)
        }
        fn put(&mut self, path: &str, _body: &Value) -> Result<String, ClientError> {
            self.answer("PUT", path)
        }
        fn delete(&mut self, path: &str) -> Result<String, ClientError> {
            self.answer("DELETE", path)
        }
    }

    pub fn shared_registry() -> SharedRegistry {
        Rc::new(RefCell::new(CacheRegistry::new()))
    }
}
