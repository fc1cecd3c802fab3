//! Tolerant pipeline definition parser
//!
//! Accepts both the factory export shape (`{"name": …, "properties": {…}}`)
//! and a bare properties object. Only a malformed document is a hard error;
//! unusable fragments inside an otherwise valid document are skipped with a
//! warning so one broken activity cannot hide the rest of the analysis.

use serde_json::Value;
use tracing::warn;

use crate::errors::{PipelintError, Result};
use crate::shared::models::{
    Activity, ActivityControl, ActivityPolicy, Dependency, DependencyCondition, Parameter,
    Pipeline,
};

/// Parse a pipeline definition from raw JSON text.
pub fn parse_pipeline(raw: &str) -> Result<Pipeline> {
    let root: Value = serde_json::from_str(raw)
        .map_err(|e| PipelintError::parse(format!("invalid JSON: {e}")))?;

    let root = root
        .as_object()
        .ok_or_else(|| PipelintError::parse("pipeline definition must be a JSON object"))?;

    // Factory exports wrap the definition in "properties"; tolerate both.
    let props = match root.get("properties").and_then(Value::as_object) {
        Some(props) => props,
        None => root,
    };

    let name = root
        .get("name")
        .or_else(|| props.get("name"))
        .and_then(Value::as_str)
        .map(str::to_owned);

    let description = props
        .get("description")
        .and_then(Value::as_str)
        .map(str::to_owned);

    let activities = match props.get("activities") {
        Some(Value::Array(items)) => items.iter().filter_map(parse_activity).collect(),
        Some(_) => {
            warn!("'activities' is not an array; treating pipeline as empty");
            Vec::new()
        }
        None => Vec::new(),
    };

    // serde_json object iteration is key-sorted, which keeps parameter
    // findings order-stable across runs.
    let parameters = match props.get("parameters").and_then(Value::as_object) {
        Some(params) => params
            .iter()
            .map(|(pname, value)| Parameter {
                name: pname.clone(),
                param_type: value.get("type").and_then(Value::as_str).map(str::to_owned),
                description: value
                    .get("description")
                    .and_then(Value::as_str)
                    .map(str::to_owned),
                default_value: value.get("defaultValue").cloned(),
            })
            .collect(),
        None => Vec::new(),
    };

    Ok(Pipeline {
        name,
        description,
        activities,
        parameters,
    })
}

fn parse_activity(value: &Value) -> Option<Activity> {
    let obj = value.as_object()?;

    let name = match obj.get("name").and_then(Value::as_str) {
        Some(name) => name.to_owned(),
        None => {
            warn!("skipping activity without a name");
            return None;
        }
    };

    let kind = obj
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or("Unknown")
        .to_owned();

    let description = obj
        .get("description")
        .and_then(Value::as_str)
        .map(str::to_owned);

    let policy = obj.get("policy").and_then(Value::as_object).map(|p| {
        ActivityPolicy {
            timeout: p
                .get("timeout")
                .and_then(Value::as_str)
                .and_then(ActivityPolicy::parse_timespan),
            retry: p.get("retry").and_then(as_u64).map(|r| r as u32),
        }
    });

    let depends_on = match obj.get("dependsOn") {
        Some(Value::Array(items)) => items.iter().filter_map(parse_dependency).collect(),
        _ => Vec::new(),
    };

    let control = parse_control(&kind, obj.get("typeProperties"));

    Some(Activity {
        name,
        kind,
        description,
        policy,
        depends_on,
        control,
    })
}

fn parse_dependency(value: &Value) -> Option<Dependency> {
    let obj = value.as_object()?;
    let activity = obj.get("activity").and_then(Value::as_str)?.to_owned();

    let conditions = match obj.get("dependencyConditions") {
        Some(Value::Array(items)) if !items.is_empty() => items
            .iter()
            .filter_map(Value::as_str)
            .filter_map(DependencyCondition::parse)
            .collect(),
        // An absent or empty wire list means "run on success".
        _ => vec![DependencyCondition::Succeeded],
    };

    Some(Dependency {
        activity,
        conditions,
    })
}

fn parse_control(kind: &str, type_props: Option<&Value>) -> Option<ActivityControl> {
    let tp = type_props.and_then(Value::as_object);

    match kind {
        "ForEach" => {
            let tp = tp?;
            Some(ActivityControl::ForEach {
                is_sequential: tp
                    .get("isSequential")
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
                batch_count: tp.get("batchCount").and_then(as_u64).map(|b| b as u32),
                activities: parse_activity_list(tp.get("activities")),
            })
        }
        "Until" => {
            let tp = tp?;
            let expression = tp
                .get("expression")
                .and_then(|e| e.get("value"))
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_owned();
            Some(ActivityControl::Until {
                expression,
                activities: parse_activity_list(tp.get("activities")),
            })
        }
        "IfCondition" => {
            let tp = tp?;
            Some(ActivityControl::IfCondition {
                if_true: parse_activity_list(tp.get("ifTrueActivities")),
                if_false: parse_activity_list(tp.get("ifFalseActivities")),
            })
        }
        "Switch" => {
            let tp = tp?;
            let cases = match tp.get("cases") {
                Some(Value::Array(cases)) => cases
                    .iter()
                    .map(|c| parse_activity_list(c.get("activities")))
                    .collect(),
                _ => Vec::new(),
            };
            Some(ActivityControl::Switch {
                cases,
                default: parse_activity_list(tp.get("defaultActivities")),
            })
        }
        "SetVariable" | "AppendVariable" => {
            let variable_name = tp?
                .get("variableName")
                .and_then(Value::as_str)?
                .to_owned();
            Some(ActivityControl::SetVariable { variable_name })
        }
        "Wait" => {
            let seconds = tp?.get("waitTimeInSeconds").and_then(as_u64)?;
            Some(ActivityControl::Wait { seconds })
        }
        _ => None,
    }
}

fn parse_activity_list(value: Option<&Value>) -> Vec<Activity> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(parse_activity).collect(),
        _ => Vec::new(),
    }
}

/// Integer extraction tolerating numeric strings (factory exports quote
/// numbers when they come from expressions).
fn as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
