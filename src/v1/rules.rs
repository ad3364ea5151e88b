//! Introspection rules API.

use crate::client::InspectorClient;
use crate::error::{InspectorError, Result};
use crate::types::RequestOptions;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Deserialize)]
struct RuleList {
    rules: Vec<Value>,
}

/// Access to `/rules`, borrowed from a [`ClientV1`](super::ClientV1).
#[derive(Debug, Clone, Copy)]
pub struct RulesApi<'a> {
    client: &'a InspectorClient,
}

impl<'a> RulesApi<'a> {
    pub(crate) fn new(client: &'a InspectorClient) -> Self {
        RulesApi { client }
    }

    /// Create a rule from its parts.
    ///
    /// `conditions` and `actions` must be lists of JSON objects. The server
    /// generates a UUID when none is given.
    pub fn create(
        &self,
        conditions: Vec<Value>,
        actions: Vec<Value>,
        uuid: Option<&str>,
        description: Option<&str>,
    ) -> Result<Value> {
        if let Some(uuid) = uuid {
            check_uuid(uuid)?;
        }
        for (name, items) in [("conditions", &conditions), ("actions", &actions)] {
            if !items.iter().all(Value::is_object) {
                return Err(InspectorError::InvalidArgument(format!(
                    "Expected list of objects for {} argument",
                    name
                )));
            }
        }

        self.from_json(json!({
            "uuid": uuid,
            "conditions": conditions,
            "actions": actions,
            "description": description,
        }))
    }

    /// Import a rule from its JSON representation.
    pub fn from_json(&self, rule: Value) -> Result<Value> {
        let response = self
            .client
            .post("/rules", RequestOptions::new().with_json(rule))?;
        response.json()
    }

    /// Short representations of every rule.
    pub fn get_all(&self) -> Result<Vec<Value>> {
        let list: RuleList = self.client.get("/rules")?.json()?;
        Ok(list.rules)
    }

    /// Full representation of one rule.
    pub fn get(&self, uuid: &str) -> Result<Value> {
        check_uuid(uuid)?;
        self.client.get(&format!("/rules/{}", uuid))?.json()
    }

    /// Delete one rule.
    pub fn delete(&self, uuid: &str) -> Result<()> {
        check_uuid(uuid)?;
        self.client.delete(&format!("/rules/{}", uuid))?;
        Ok(())
    }

    /// Delete every rule.
    pub fn delete_all(&self) -> Result<()> {
        self.client.delete("/rules")?;
        Ok(())
    }
}

fn check_uuid(uuid: &str) -> Result<()> {
    if uuid.is_empty() {
        return Err(InspectorError::InvalidArgument(
            "Expected non-empty string for uuid argument".into(),
        ));
    }
    Ok(())
}
