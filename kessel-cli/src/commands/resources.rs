use crate::error::{CliError, Result};
use crate::reference::ResourceArg;
use colored::Colorize;
use kessel_sdk::v1beta2::{
    DeleteResourceRequest, ReportResourceRequest, RepresentationMetadata, ResourceRepresentations,
    WriteVisibility,
};
use kessel_sdk::{to_struct, InventoryClient};
use prost_types::Struct;
use serde_json::json;

pub struct ReportOptions {
    pub resource: ResourceArg,
    pub reporter_instance_id: String,
    pub api_href: String,
    pub console_href: Option<String>,
    pub reporter_version: Option<String>,
    pub common: Option<String>,
    pub attributes: Option<String>,
    pub immediate: bool,
}

pub async fn handle_report(
    client: &InventoryClient,
    options: ReportOptions,
    json_output: bool,
) -> Result<()> {
    let request = build_report_request(&options)?;
    client.report_resource(request).await?;

    if json_output {
        let output = json!({
            "success": true,
            "resource": options.resource.to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{} Reported {}", "✓".green(), options.resource);
    }

    Ok(())
}

pub async fn handle_delete(
    client: &InventoryClient,
    resource: ResourceArg,
    json_output: bool,
) -> Result<()> {
    if resource.reporter.is_none() {
        return Err(CliError::InvalidInput(
            "Deleting a resource requires its reporter (type:id@reporter)".to_string(),
        ));
    }

    client
        .delete_resource(DeleteResourceRequest {
            reference: Some(resource.to_reference()),
        })
        .await?;

    if json_output {
        let output = json!({
            "success": true,
            "resource": resource.to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{} Deleted {}", "✓".green(), resource);
    }

    Ok(())
}

fn build_report_request(options: &ReportOptions) -> Result<ReportResourceRequest> {
    let reporter_type = options.resource.reporter.clone().ok_or_else(|| {
        CliError::InvalidInput("Reporting a resource requires its reporter (type:id@reporter)".to_string())
    })?;

    let write_visibility = if options.immediate {
        WriteVisibility::Immediate
    } else {
        WriteVisibility::Unspecified
    };

    Ok(ReportResourceRequest {
        inventory_id: None,
        r#type: options.resource.resource_type.clone(),
        reporter_type,
        reporter_instance_id: options.reporter_instance_id.clone(),
        representations: Some(ResourceRepresentations {
            metadata: Some(RepresentationMetadata {
                local_resource_id: options.resource.resource_id.clone(),
                api_href: options.api_href.clone(),
                console_href: options.console_href.clone(),
                reporter_version: options.reporter_version.clone(),
                transaction_id: None,
            }),
            common: parse_attributes(options.common.as_deref(), "--common")?,
            reporter: parse_attributes(options.attributes.as_deref(), "--attributes")?,
        }),
        write_visibility: write_visibility as i32,
    })
}

fn parse_attributes(raw: Option<&str>, flag: &str) -> Result<Option<Struct>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| CliError::InvalidInput(format!("{} is not valid JSON: {}", flag, e)))?;
    Ok(Some(to_struct(value)?))
}
