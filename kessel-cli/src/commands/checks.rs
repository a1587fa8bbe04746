use crate::cli::CheckArgs;
use crate::error::Result;
use crate::reference::{ObjectTypeArg, ResourceArg};
use colored::Colorize;
use kessel_sdk::v1beta2::{
    Allowed, CheckForUpdateRequest, CheckRequest, RequestPagination, StreamedListObjectsRequest,
};
use kessel_sdk::InventoryClient;
use serde_json::json;

pub async fn handle_check(client: &InventoryClient, args: CheckArgs, json_output: bool) -> Result<()> {
    let response = client
        .check(CheckRequest {
            object: Some(args.object.to_reference()),
            relation: args.relation.clone(),
            subject: Some(args.subject.to_subject(args.subject_relation.clone())),
            consistency: None,
        })
        .await?;

    print_decision(&args, response.allowed(), json_output)
}

pub async fn handle_check_for_update(
    client: &InventoryClient,
    args: CheckArgs,
    json_output: bool,
) -> Result<()> {
    let response = client
        .check_for_update(CheckForUpdateRequest {
            object: Some(args.object.to_reference()),
            relation: args.relation.clone(),
            subject: Some(args.subject.to_subject(args.subject_relation.clone())),
        })
        .await?;

    print_decision(&args, response.allowed(), json_output)
}

pub async fn handle_list_objects(
    client: &InventoryClient,
    object_type: ObjectTypeArg,
    relation: String,
    subject: ResourceArg,
    subject_relation: Option<String>,
    limit: Option<u32>,
    json_output: bool,
) -> Result<()> {
    let request = StreamedListObjectsRequest {
        object_type: Some(object_type.to_representation_type()),
        relation,
        subject: Some(subject.to_subject(subject_relation)),
        pagination: limit.map(|limit| RequestPagination {
            limit,
            continuation_token: None,
        }),
        consistency: None,
    };

    let objects = client.list_objects(request).await?;

    if json_output {
        let output: Vec<_> = objects
            .iter()
            .map(|object| {
                json!({
                    "resource_type": object.resource_type,
                    "resource_id": object.resource_id,
                    "reporter": object.reporter.as_ref().map(|r| r.r#type.clone()),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if objects.is_empty() {
        println!("{}", "No objects found".yellow());
    } else {
        for object in &objects {
            println!("{}:{}", object.resource_type, object.resource_id);
        }
        println!("{} {} object(s)", "✓".green(), objects.len());
    }

    Ok(())
}

fn print_decision(args: &CheckArgs, allowed: Allowed, json_output: bool) -> Result<()> {
    if json_output {
        let output = json!({
            "object": args.object.to_string(),
            "relation": args.relation,
            "subject": args.subject.to_string(),
            "allowed": allowed == Allowed::True,
            "result": allowed.as_str_name(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let question = format!("{} {} {}", args.subject, args.relation, args.object);
    match allowed {
        Allowed::True => println!("{} {}", "✓ Allowed:".green(), question),
        Allowed::False => println!("{} {}", "✗ Denied:".red(), question),
        Allowed::Unspecified => println!("{} {}", "? Unspecified:".yellow(), question),
    }

    Ok(())
}
