//! Adds a timeouts block to a resource schema, validates a config and bounds
//! a simulated create with the configured timeout.
//!
//! cargo run -p tfplug-timeouts --example resource_timeouts

use std::collections::HashMap;
use std::time::Duration;
use tfplug::types::{AttributePath, Dynamic, DynamicValue};
use tfplug::{AttributeBuilder, Context, SchemaBuilder};
use tfplug_timeouts::resource;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let opts = resource::Opts::default()
        .with_create_description("How long to wait for the VM to boot")
        .with_delete();
    let schema = SchemaBuilder::new()
        .attribute(AttributeBuilder::string("name").required().build())
        .block(resource::block(&opts))
        .build();

    let config = DynamicValue::new(Dynamic::Map(HashMap::from([
        ("name".to_string(), Dynamic::String("vm-100".to_string())),
        (
            "timeouts".to_string(),
            Dynamic::Map(HashMap::from([
                ("create".to_string(), Dynamic::String("150ms".to_string())),
                ("delete".to_string(), Dynamic::String("2 minutes".to_string())),
            ])),
        ),
    ])));

    for diag in schema.validate(&config).iter() {
        let path = diag.attribute.as_ref().map(ToString::to_string).unwrap_or_default();
        println!("{:?} at {}: {}: {}", diag.severity, path, diag.summary, diag.detail);
    }

    let ty = resource::Type(tfplug_timeouts::TimeoutsType::for_timeouts(["create", "delete"]));
    let timeouts = ty.value_from_terraform(config.get(&AttributePath::new("timeouts"))?)?;
    println!("timeouts = {}", timeouts);

    let (delete, diags) = timeouts.delete(Duration::from_secs(10 * 60));
    println!("delete timeout {:?} ({} diagnostics)", delete, diags.len());

    let (ctx, _) = timeouts.deadline_context(&Context::new(), "create", Duration::from_secs(20 * 60));
    tokio::select! {
        _ = ctx.cancelled() => println!("create timed out after {:?}", Duration::from_millis(150)),
        _ = tokio::time::sleep(Duration::from_secs(1)) => println!("create finished"),
    }

    Ok(())
}
