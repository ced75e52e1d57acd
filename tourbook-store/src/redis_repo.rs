use redis::Commands;
use tracing::debug;

use crate::kv::{KeyValueStore, StoreResult};

/// Redis-backed session store. Keys are namespaced, e.g. `tourbook:paymentMethod`.
#[derive(Clone)]
pub struct RedisStore {
    client: redis::Client,
    namespace: String,
}

impl RedisStore {
    pub fn new(connection_string: &str, namespace: &str) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(connection_string)?;
        Ok(Self {
            client,
            namespace: namespace.to_string(),
        })
    }

    fn key(&self, key: &str) -> String {
        format!("{}:{}", self.namespace, key)
    }
}

impl KeyValueStore for RedisStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let mut conn = self.client.get_connection()?;
        let value: Option<String> = conn.get(self.key(key))?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut conn = self.client.get_connection()?;
        conn.set::<_, _, ()>(self.key(key), value)?;
        debug!("Stored session key {}", key);
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let mut conn = self.client.get_connection()?;
        conn.del::<_, ()>(self.key(key))?;
        Ok(())
    }
}
