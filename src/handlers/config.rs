//! The built-in configuration handler: operations that report the
//! process configuration the binary was started with.

use opkit_core::{
    Audience, Handler, Operation, OperationResult, Operations, Outcome, Property,
    PropertyCollection, PropertyType, PropertyUsage, Value,
};

use crate::config::AppContext;

/// Contributes `config.show` (external) and `config.debug` (internal).
pub struct ConfigHandler {
    context: AppContext,
}

impl ConfigHandler {
    pub fn new(context: &AppContext) -> Self {
        Self {
            context: context.clone(),
        }
    }
}

impl Handler for ConfigHandler {
    fn id(&self) -> &str {
        "config"
    }

    fn operations(&self) -> Operations {
        let mut ops = Operations::new();
        ops.add(Box::new(ShowConfig::new(&self.context)));
        ops.add(Box::new(DebugConfig::new(&self.context)));
        ops
    }
}

/// Reports the resolved project name and working directory.
struct ShowConfig {
    context: AppContext,
    properties: PropertyCollection,
}

impl ShowConfig {
    fn new(context: &AppContext) -> Self {
        let mut properties = PropertyCollection::new();
        properties.add(Property::new(
            "name",
            "Resolved project name",
            PropertyType::Text,
            PropertyUsage::output(Audience::External),
        ));
        properties.add(Property::new(
            "working_dir",
            "Directory the configuration was loaded from",
            PropertyType::Text,
            PropertyUsage::output(Audience::External),
        ));
        Self {
            context: context.clone(),
            properties,
        }
    }
}

impl Operation for ShowConfig {
    fn id(&self) -> &str {
        "config.show"
    }

    fn label(&self) -> &str {
        "Show configuration"
    }

    fn description(&self) -> &str {
        "Show the resolved project configuration"
    }

    fn usage(&self) -> Audience {
        Audience::External
    }

    fn properties(&self) -> &PropertyCollection {
        &self.properties
    }

    fn properties_mut(&mut self) -> &mut PropertyCollection {
        &mut self.properties
    }

    fn exec(&mut self) -> OperationResult {
        let name = self.context.project_name();
        let working_dir = self.context.working_dir.display().to_string();
        let assigned = self
            .properties
            .set("name", Value::Text(name))
            .and_then(|_| self.properties.set("working_dir", Value::Text(working_dir)));
        match assigned {
            Ok(()) => OperationResult::ready(Outcome::success()),
            Err(err) => OperationResult::ready(Outcome::error(err)),
        }
    }
}

/// Dumps the raw serialized configuration. Internal audience: only
/// reachable when the binder runs in internal mode.
struct DebugConfig {
    context: AppContext,
    properties: PropertyCollection,
}

impl DebugConfig {
    fn new(context: &AppContext) -> Self {
        let mut properties = PropertyCollection::new();
        properties.add(Property::new(
            "config",
            "Raw serialized configuration",
            PropertyType::Text,
            PropertyUsage::output(Audience::Internal),
        ));
        Self {
            context: context.clone(),
            properties,
        }
    }
}

impl Operation for DebugConfig {
    fn id(&self) -> &str {
        "config.debug"
    }

    fn label(&self) -> &str {
        "Dump configuration"
    }

    fn description(&self) -> &str {
        "Dump the raw loaded configuration"
    }

    fn usage(&self) -> Audience {
        Audience::Internal
    }

    fn properties(&self) -> &PropertyCollection {
        &self.properties
    }

    fn properties_mut(&mut self) -> &mut PropertyCollection {
        &mut self.properties
    }

    fn exec(&mut self) -> OperationResult {
        let raw = match toml::to_string_pretty(&self.context.config) {
            Ok(raw) => raw,
            Err(err) => return OperationResult::ready(Outcome::error(err)),
        };
        match self.properties.set("config", Value::Text(raw)) {
            Ok(()) => OperationResult::ready(Outcome::success()),
            Err(err) => OperationResult::ready(Outcome::error(err)),
        }
    }
}
