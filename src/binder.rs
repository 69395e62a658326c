//! The CLI binder: turns an operation collection into a clap command
//! surface and runs invocations, purely from operation and property
//! metadata.
//!
//! No per-operation CLI code exists anywhere — commands, aliases,
//! categories and flags all derive from ids, descriptions, type tags and
//! usage flags. Dispatch assigns matched flag values into the
//! operation's property collection, calls `exec`, awaits the result
//! (the one deliberate suspension point; unbounded unless a timeout was
//! requested) and renders the outcome.

use std::collections::HashMap;
use std::time::Duration;

use clap::{Arg, ArgAction, ArgMatches, Command};
use opkit_core::{Operation, Operations, Property, PropertyType, Value};
use thiserror::Error;

use crate::report::Report;

/// Errors from building and running CLI invocations.
#[derive(Debug, Error)]
pub enum BinderError {
    /// A flag value could not be converted or assigned; raised before
    /// `exec` is called.
    #[error("invalid value for --{flag}: {message}")]
    Configuration { flag: String, message: String },

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    /// The operation reported failure; carries its last reported error.
    #[error("{0}")]
    Execution(#[source] anyhow::Error),

    /// The operation reported failure but gave no reason.
    #[error("unknown error occurred while running the operation")]
    UnknownFailure,

    #[error("operation timed out after {0:?}")]
    Timeout(Duration),
}

/// How the binder runs: whether internal operations and properties are
/// exposed, and whether the wait on a result is bounded.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinderOptions {
    pub internal: bool,
    pub timeout: Option<Duration>,
}

/// Add one subcommand per eligible operation to `root`.
///
/// An operation is included iff the binder runs in internal mode or the
/// operation's audience is external. The full id is the command name,
/// the final id segment its visible alias; the category (first segment)
/// is shown in the command's help text.
///
/// An alias is only registered when it is unambiguous: when several
/// eligible operations share a final segment (or one operation's alias
/// equals another's full id), none of the colliding operations gets that
/// alias and each remains reachable by its full id.
pub fn attach_operations(mut root: Command, ops: &Operations, internal: bool) -> Command {
    let mut name_counts: HashMap<&str, usize> = HashMap::new();
    for op in ops.iter() {
        if !internal && !op.usage().is_external() {
            continue;
        }
        *name_counts.entry(op.id()).or_default() += 1;
        if op.alias() != op.id() {
            *name_counts.entry(op.alias()).or_default() += 1;
        }
    }

    for id in ops.order() {
        let Some(op) = ops.get(id) else { continue };
        if !internal && !op.usage().is_external() {
            tracing::debug!(%id, "skipping internal operation");
            continue;
        }

        tracing::debug!(
            %id,
            category = op.category(),
            alias = op.alias(),
            "adding operation command"
        );

        let mut sub = Command::new(op.id().to_string())
            .about(op.description().to_string())
            .after_help(format!("Category: {}", op.category()));
        if op.alias() != op.id() {
            if name_counts.get(op.alias()).copied().unwrap_or(0) > 1 {
                tracing::warn!(
                    %id,
                    alias = op.alias(),
                    "alias shared by multiple operations, none registered"
                );
            } else {
                sub = sub.visible_alias(op.alias().to_string());
            }
        }
        for prop in op.properties().iter() {
            if let Some(arg) = flag_for_property(prop, internal) {
                sub = sub.arg(arg);
            }
        }
        root = root.subcommand(sub);
    }
    root
}

/// Map one property to a CLI flag, or `None` when the property is not an
/// eligible input (not visible-before, internal-only in external mode,
/// or an opaque type no flag can express).
fn flag_for_property(prop: &Property, internal: bool) -> Option<Arg> {
    if !prop.usage().is_settable(internal) {
        return None;
    }

    let arg = Arg::new(prop.id().to_string())
        .long(prop.id().to_string())
        .help(prop.description().to_string());
    let arg = match prop.property_type() {
        PropertyType::Text | PropertyType::Bytes => arg.action(ArgAction::Set),
        PropertyType::TextList => arg.action(ArgAction::Append),
        PropertyType::Int32 => arg
            .action(ArgAction::Set)
            .value_parser(clap::value_parser!(i32)),
        PropertyType::Int64 => arg
            .action(ArgAction::Set)
            .value_parser(clap::value_parser!(i64)),
        PropertyType::Bool => arg.action(ArgAction::SetTrue),
        PropertyType::Opaque(kind) => {
            tracing::debug!(id = prop.id(), %kind, "no flag for opaque property type");
            return None;
        }
    };
    Some(arg)
}

/// Run the named operation against its matched flags.
///
/// `matches` must come from a command built by [`attach_operations`]
/// with the same `internal` mode.
pub async fn dispatch(
    ops: &mut Operations,
    name: &str,
    matches: &ArgMatches,
    options: BinderOptions,
) -> Result<Report, BinderError> {
    let op = ops
        .get_mut(name)
        .ok_or_else(|| BinderError::UnknownCommand(name.to_string()))?;

    assign_properties(op, matches, options.internal)?;

    tracing::debug!(id = name, "running operation");
    let result = op.exec();
    let outcome = match options.timeout {
        Some(limit) => tokio::time::timeout(limit, result.finished())
            .await
            .map_err(|_| BinderError::Timeout(limit))?,
        None => result.finished().await,
    };

    if outcome.is_success() {
        Ok(render_success(&*op, options.internal))
    } else {
        let mut errors = outcome.into_errors();
        if errors.is_empty() {
            tracing::error!(id = name, "operation reported failure without an error");
            return Err(BinderError::UnknownFailure);
        }
        for err in &errors {
            tracing::error!(id = name, error = %err, "operation error");
        }
        match errors.pop() {
            Some(last) => Err(BinderError::Execution(last)),
            None => Err(BinderError::UnknownFailure),
        }
    }
}

/// Assign matched flag values into the operation's property collection,
/// converting per type tag. Fails before `exec` on any assignment error.
fn assign_properties(
    op: &mut dyn Operation,
    matches: &ArgMatches,
    internal: bool,
) -> Result<(), BinderError> {
    let inputs: Vec<(String, PropertyType)> = op
        .properties()
        .iter()
        .filter(|prop| prop.usage().is_settable(internal))
        .map(|prop| (prop.id().to_string(), prop.property_type().clone()))
        .collect();

    for (id, property_type) in inputs {
        let value =
            flag_value(matches, &id, &property_type).map_err(|err| BinderError::Configuration {
                flag: id.clone(),
                message: err.to_string(),
            })?;
        if let Some(value) = value {
            op.properties_mut()
                .set(&id, value)
                .map_err(|err| BinderError::Configuration {
                    flag: id.clone(),
                    message: err.to_string(),
                })?;
        }
    }
    Ok(())
}

/// Read one matched flag as the property's declared type. A flag that
/// was registered with a different kind than the tag asks for (or not
/// registered at all) is a configuration error, not a panic.
fn flag_value(
    matches: &ArgMatches,
    id: &str,
    property_type: &PropertyType,
) -> Result<Option<Value>, clap::parser::MatchesError> {
    Ok(match property_type {
        PropertyType::Text => matches
            .try_get_one::<String>(id)?
            .map(|text| Value::Text(text.clone())),
        PropertyType::Bytes => matches
            .try_get_one::<String>(id)?
            .map(|text| Value::Bytes(text.clone().into_bytes())),
        PropertyType::TextList => matches
            .try_get_many::<String>(id)?
            .map(|items| Value::TextList(items.cloned().collect())),
        PropertyType::Int32 => matches.try_get_one::<i32>(id)?.copied().map(Value::Int32),
        PropertyType::Int64 => matches.try_get_one::<i64>(id)?.copied().map(Value::Int64),
        // An absent boolean flag leaves the property unset rather than
        // assigning false.
        PropertyType::Bool => matches
            .try_get_one::<bool>(id)?
            .copied()
            .filter(|set| *set)
            .map(Value::Bool),
        PropertyType::Opaque(_) => None,
    })
}

/// Build the success report from visible-after properties, in collection
/// order. Values no report representation exists for are skipped with a
/// debug log, never an error.
fn render_success(op: &dyn Operation, internal: bool) -> Report {
    let mut report = Report::new(op.id(), true);
    for prop in op.properties().iter() {
        if !prop.usage().is_reportable(internal) {
            continue;
        }
        let Some(value) = prop.get() else { continue };
        match report_value(value) {
            Some(rendered) => report.push(prop.id(), rendered),
            None => tracing::debug!(
                id = prop.id(),
                kind = %prop.property_type(),
                "skipping property with no report representation"
            ),
        }
    }
    report
}

fn report_value(value: &Value) -> Option<serde_json::Value> {
    match value {
        Value::Text(text) => Some(serde_json::Value::String(text.clone())),
        Value::TextList(items) => Some(serde_json::json!(items)),
        Value::Bytes(bytes) => Some(serde_json::Value::String(
            String::from_utf8_lossy(bytes).into_owned(),
        )),
        Value::Int32(n) => Some(serde_json::json!(n)),
        Value::Int64(n) => Some(serde_json::json!(n)),
        Value::Bool(b) => Some(serde_json::json!(b)),
        Value::Opaque(handle) => handle.summary().map(serde_json::Value::String),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opkit_core::{
        Api, Audience, Handler, OpaqueValue, OperationResult, Outcome, PropertyCollection,
        PropertyUsage,
    };
    use serde_json::json;
    use std::sync::Arc;

    #[derive(Debug)]
    struct UserHandle {
        name: String,
    }

    impl OpaqueValue for UserHandle {
        fn kind(&self) -> &str {
            "user"
        }

        fn summary(&self) -> Option<String> {
            Some(self.name.clone())
        }
    }

    /// What a test operation does when executed.
    enum Behavior {
        /// Succeed after assigning the given outputs.
        Produce(Vec<(&'static str, Value)>),
        /// Fail with the given error messages.
        Fail(Vec<&'static str>),
        /// Fail without reporting any error.
        FailSilently,
        /// Never complete within any test-sized timeout.
        Stall,
    }

    struct TestOperation {
        id: &'static str,
        audience: Audience,
        properties: PropertyCollection,
        behavior: Behavior,
    }

    impl Operation for TestOperation {
        fn id(&self) -> &str {
            self.id
        }

        fn label(&self) -> &str {
            self.id
        }

        fn description(&self) -> &str {
            "test operation"
        }

        fn usage(&self) -> Audience {
            self.audience
        }

        fn properties(&self) -> &PropertyCollection {
            &self.properties
        }

        fn properties_mut(&mut self) -> &mut PropertyCollection {
            &mut self.properties
        }

        fn exec(&mut self) -> OperationResult {
            match &self.behavior {
                Behavior::Produce(outputs) => {
                    for (id, value) in outputs {
                        if let Err(err) = self.properties.set(id, value.clone()) {
                            return OperationResult::ready(Outcome::error(err));
                        }
                    }
                    OperationResult::ready(Outcome::success())
                }
                Behavior::Fail(messages) => OperationResult::ready(Outcome::failure(
                    messages.iter().map(|m| anyhow::anyhow!(*m)).collect(),
                )),
                Behavior::FailSilently => OperationResult::ready(Outcome::failure(Vec::new())),
                Behavior::Stall => {
                    let (tx, result) = OperationResult::channel();
                    // Leak the sender so the result never resolves.
                    std::mem::forget(tx);
                    result
                }
            }
        }
    }

    fn users_list(behavior: Behavior) -> Box<dyn Operation> {
        let mut properties = PropertyCollection::new();
        properties.add(Property::new(
            "filter",
            "Filter expression",
            PropertyType::Text,
            PropertyUsage::input(Audience::External),
        ));
        properties.add(Property::new(
            "count",
            "Number of matching users",
            PropertyType::Int32,
            PropertyUsage::output(Audience::External),
        ));
        Box::new(TestOperation {
            id: "users.list",
            audience: Audience::External,
            properties,
            behavior,
        })
    }

    fn auth_login() -> Box<dyn Operation> {
        let mut properties = PropertyCollection::new();
        properties.add(Property::new(
            "username",
            "Account name",
            PropertyType::Text,
            PropertyUsage::input(Audience::External),
        ));
        properties.add(Property::new(
            "password",
            "Account password",
            PropertyType::Text,
            PropertyUsage::input(Audience::External),
        ));
        properties.add(Property::new(
            "user",
            "Authenticated user handle",
            PropertyType::Opaque("user".into()),
            PropertyUsage::output(Audience::External),
        ));
        let user: Arc<dyn OpaqueValue> = Arc::new(UserHandle {
            name: "ada".into(),
        });
        Box::new(TestOperation {
            id: "auth.login",
            audience: Audience::External,
            properties,
            behavior: Behavior::Produce(vec![("user", Value::Opaque(user))]),
        })
    }

    struct OneOpHandler {
        id: &'static str,
        build: fn() -> Box<dyn Operation>,
    }

    impl Handler for OneOpHandler {
        fn id(&self) -> &str {
            self.id
        }

        fn operations(&self) -> Operations {
            let mut ops = Operations::new();
            ops.add((self.build)());
            ops
        }
    }

    fn root() -> Command {
        Command::new("opkit-test").subcommand_required(true)
    }

    #[test]
    fn internal_operations_are_hidden_outside_internal_mode() {
        let mut ops = Operations::new();
        ops.add(Box::new(TestOperation {
            id: "debug.dump",
            audience: Audience::Internal,
            properties: PropertyCollection::new(),
            behavior: Behavior::Produce(Vec::new()),
        }));

        let external = attach_operations(root(), &ops, false);
        assert!(external.find_subcommand("debug.dump").is_none());

        let internal = attach_operations(root(), &ops, true);
        assert!(internal.find_subcommand("debug.dump").is_some());
    }

    #[test]
    fn internal_only_inputs_get_no_flag_in_external_mode() {
        let mut properties = PropertyCollection::new();
        properties.add(Property::new(
            "filter",
            "",
            PropertyType::Text,
            PropertyUsage::input(Audience::External),
        ));
        properties.add(Property::new(
            "trace",
            "",
            PropertyType::Bool,
            PropertyUsage::input(Audience::Internal),
        ));
        let mut ops = Operations::new();
        ops.add(Box::new(TestOperation {
            id: "users.list",
            audience: Audience::External,
            properties,
            behavior: Behavior::Produce(Vec::new()),
        }));

        let external = attach_operations(root(), &ops, false);
        let sub = external.find_subcommand("users.list").unwrap();
        let flags: Vec<_> = sub
            .get_arguments()
            .map(|a| a.get_id().as_str().to_string())
            .collect();
        assert!(flags.contains(&"filter".to_string()));
        assert!(!flags.contains(&"trace".to_string()));

        let internal = attach_operations(root(), &ops, true);
        let sub = internal.find_subcommand("users.list").unwrap();
        assert!(sub.get_arguments().any(|a| a.get_id() == "trace"));
    }

    #[test]
    fn opaque_inputs_never_become_flags() {
        let mut properties = PropertyCollection::new();
        properties.add(Property::new(
            "session",
            "",
            PropertyType::Opaque("session".into()),
            PropertyUsage::input(Audience::External),
        ));
        let mut ops = Operations::new();
        ops.add(Box::new(TestOperation {
            id: "auth.refresh",
            audience: Audience::External,
            properties,
            behavior: Behavior::Produce(Vec::new()),
        }));

        let cmd = attach_operations(root(), &ops, true);
        let sub = cmd.find_subcommand("auth.refresh").unwrap();
        assert_eq!(sub.get_arguments().count(), 0);
    }

    #[tokio::test]
    async fn two_handlers_build_the_expected_surface_end_to_end() {
        let mut api = Api::new();
        api.add_handler(Box::new(OneOpHandler {
            id: "users",
            build: || users_list(Behavior::Produce(vec![("count", Value::Int32(3))])),
        }));
        api.add_handler(Box::new(OneOpHandler {
            id: "auth",
            build: auth_login,
        }));
        assert!(api.validate());

        let mut ops = api.operations();
        let cmd = attach_operations(root(), &ops, false);
        assert_eq!(cmd.get_subcommands().count(), 2);

        let users = cmd.find_subcommand("users.list").unwrap();
        assert!(users.get_all_aliases().any(|a| a == "list"));
        assert!(
            users
                .get_after_help()
                .map(|h| h.to_string().contains("Category: users"))
                .unwrap_or(false)
        );

        let auth = cmd.find_subcommand("auth.login").unwrap();
        assert!(auth.get_all_aliases().any(|a| a == "login"));
        assert!(
            auth.get_after_help()
                .map(|h| h.to_string().contains("Category: auth"))
                .unwrap_or(false)
        );

        let matches = cmd
            .try_get_matches_from(["opkit-test", "users.list", "--filter", "active"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "users.list");

        let report = dispatch(&mut ops, name, sub, BinderOptions::default())
            .await
            .unwrap();
        assert!(report.success());
        assert_eq!(report.get("count"), Some(&json!(3)));
        // Inputs are not reported, only visible-after properties.
        assert_eq!(report.get("filter"), None);
    }

    #[test]
    fn colliding_aliases_are_not_registered() {
        let mut ops = Operations::new();
        ops.add(users_list(Behavior::Produce(Vec::new())));
        ops.add(Box::new(TestOperation {
            id: "projects.list",
            audience: Audience::External,
            properties: PropertyCollection::new(),
            behavior: Behavior::Produce(Vec::new()),
        }));
        ops.add(auth_login());

        let cmd = attach_operations(root(), &ops, false);
        // Building and parsing must survive the shared `list` segment.
        let matches = cmd
            .clone()
            .try_get_matches_from(["opkit-test", "projects.list"])
            .unwrap();
        assert_eq!(matches.subcommand().unwrap().0, "projects.list");

        assert_eq!(
            cmd.find_subcommand("users.list")
                .unwrap()
                .get_all_aliases()
                .count(),
            0
        );
        assert_eq!(
            cmd.find_subcommand("projects.list")
                .unwrap()
                .get_all_aliases()
                .count(),
            0
        );
        // The unambiguous alias is still registered.
        assert!(
            cmd.find_subcommand("auth.login")
                .unwrap()
                .get_all_aliases()
                .any(|a| a == "login")
        );
        // The bare segment no longer resolves to anything.
        assert!(cmd.try_get_matches_from(["opkit-test", "list"]).is_err());
    }

    #[tokio::test]
    async fn mismatched_flag_kind_is_a_configuration_error() {
        let mut properties = PropertyCollection::new();
        properties.add(Property::new(
            "count",
            "",
            PropertyType::Int32,
            PropertyUsage::input(Audience::External),
        ));
        let mut ops = Operations::new();
        ops.add(Box::new(TestOperation {
            id: "users.list",
            audience: Audience::External,
            properties,
            behavior: Behavior::Fail(vec!["exec must not run"]),
        }));

        // A surface registered with a plain string flag where the
        // schema asks for int32.
        let cmd =
            root().subcommand(Command::new("users.list").arg(Arg::new("count").long("count")));
        let matches = cmd
            .try_get_matches_from(["opkit-test", "users.list", "--count", "3"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();

        let err = dispatch(&mut ops, name, sub, BinderOptions::default())
            .await
            .unwrap_err();
        // Configuration, not Execution: exec was never reached.
        assert!(matches!(err, BinderError::Configuration { ref flag, .. } if flag == "count"));
    }

    #[tokio::test]
    async fn alias_resolves_to_the_canonical_command() {
        let mut api = Api::new();
        api.add_handler(Box::new(OneOpHandler {
            id: "users",
            build: || users_list(Behavior::Produce(vec![("count", Value::Int32(0))])),
        }));
        let mut ops = api.operations();
        let cmd = attach_operations(root(), &ops, false);

        let matches = cmd.try_get_matches_from(["opkit-test", "list"]).unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "users.list");
        let report = dispatch(&mut ops, name, sub, BinderOptions::default())
            .await
            .unwrap();
        assert_eq!(report.get("count"), Some(&json!(0)));
    }

    #[tokio::test]
    async fn flag_values_reach_the_operation_properties() {
        let mut ops = Operations::new();
        ops.add(users_list(Behavior::Produce(Vec::new())));
        let cmd = attach_operations(root(), &ops, false);
        let matches = cmd
            .try_get_matches_from(["opkit-test", "users.list", "--filter", "active"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        dispatch(&mut ops, name, sub, BinderOptions::default())
            .await
            .unwrap();

        let filter = ops
            .get("users.list")
            .unwrap()
            .properties()
            .get("filter")
            .unwrap()
            .get()
            .and_then(Value::as_text)
            .map(str::to_string);
        assert_eq!(filter.as_deref(), Some("active"));
    }

    #[tokio::test]
    async fn silent_failure_synthesizes_exactly_one_generic_error() {
        let mut ops = Operations::new();
        ops.add(users_list(Behavior::FailSilently));
        let cmd = attach_operations(root(), &ops, false);
        let matches = cmd
            .try_get_matches_from(["opkit-test", "users.list"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();

        let err = dispatch(&mut ops, name, sub, BinderOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, BinderError::UnknownFailure));
        assert!(err.to_string().contains("unknown error"));
    }

    #[tokio::test]
    async fn reported_failure_surfaces_the_last_error() {
        let mut ops = Operations::new();
        ops.add(users_list(Behavior::Fail(vec![
            "connection refused",
            "user listing unavailable",
        ])));
        let cmd = attach_operations(root(), &ops, false);
        let matches = cmd
            .try_get_matches_from(["opkit-test", "users.list"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();

        let err = dispatch(&mut ops, name, sub, BinderOptions::default())
            .await
            .unwrap_err();
        match err {
            BinderError::Execution(inner) => {
                assert_eq!(inner.to_string(), "user listing unavailable")
            }
            other => panic!("expected Execution, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn opt_in_timeout_bounds_the_wait() {
        let mut ops = Operations::new();
        ops.add(users_list(Behavior::Stall));
        let cmd = attach_operations(root(), &ops, false);
        let matches = cmd
            .try_get_matches_from(["opkit-test", "users.list"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();

        let options = BinderOptions {
            internal: false,
            timeout: Some(Duration::from_millis(10)),
        };
        let err = dispatch(&mut ops, name, sub, options).await.unwrap_err();
        assert!(matches!(err, BinderError::Timeout(_)));
    }

    #[tokio::test]
    async fn internal_outputs_only_appear_in_internal_reports() {
        let mut properties = PropertyCollection::new();
        properties.add(Property::new(
            "count",
            "",
            PropertyType::Int32,
            PropertyUsage::output(Audience::External),
        ));
        properties.add(Property::new(
            "elapsed_ms",
            "",
            PropertyType::Int64,
            PropertyUsage::output(Audience::Internal),
        ));
        let build = |internal: bool| {
            let mut ops = Operations::new();
            ops.add(Box::new(TestOperation {
                id: "users.list",
                audience: Audience::External,
                properties: properties.clone(),
                behavior: Behavior::Produce(vec![
                    ("count", Value::Int32(3)),
                    ("elapsed_ms", Value::Int64(12)),
                ]),
            }) as Box<dyn Operation>);
            let cmd = attach_operations(root(), &ops, internal);
            (ops, cmd)
        };

        let (mut ops, cmd) = build(false);
        let matches = cmd
            .try_get_matches_from(["opkit-test", "users.list"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        let report = dispatch(&mut ops, name, sub, BinderOptions::default())
            .await
            .unwrap();
        assert_eq!(report.get("count"), Some(&json!(3)));
        assert_eq!(report.get("elapsed_ms"), None);

        let (mut ops, cmd) = build(true);
        let matches = cmd
            .try_get_matches_from(["opkit-test", "users.list"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        let options = BinderOptions {
            internal: true,
            timeout: None,
        };
        let report = dispatch(&mut ops, name, sub, options).await.unwrap();
        assert_eq!(report.get("elapsed_ms"), Some(&json!(12)));
    }

    #[tokio::test]
    async fn opaque_outputs_render_through_their_summary() {
        let mut ops = Operations::new();
        ops.add(auth_login());
        let cmd = attach_operations(root(), &ops, false);
        let matches = cmd
            .try_get_matches_from([
                "opkit-test",
                "auth.login",
                "--username",
                "ada",
                "--password",
                "hunter2",
            ])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        let report = dispatch(&mut ops, name, sub, BinderOptions::default())
            .await
            .unwrap();
        assert!(report.success());
        assert_eq!(report.get("user"), Some(&json!("ada")));
    }
}
