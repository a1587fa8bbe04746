use crate::reference::{ObjectTypeArg, ResourceArg};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "kessel",
    version,
    about = "Kessel CLI for reporting resources and checking relations",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,
}

/// Where the inventory service is and how to reach it
///
/// Without `--endpoint` or `--config`, the standard configuration locations
/// are searched.
#[derive(Args, Debug, Default)]
pub struct ConnectionArgs {
    /// Inventory service address (e.g., localhost:9000)
    #[arg(long, global = true, env = "KESSEL_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Use a plaintext channel
    #[arg(long, global = true)]
    pub insecure: bool,

    /// Path to the server CA certificate
    #[arg(long, global = true, env = "KESSEL_CA_CERT_FILE")]
    pub ca_cert: Option<PathBuf>,

    /// Path to a JSON or TOML configuration file, used instead of the flags above
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// OAuth2 client id
    #[arg(long, global = true, env = "KESSEL_CLIENT_ID")]
    pub client_id: Option<String>,

    /// OAuth2 client secret
    #[arg(long, global = true, env = "KESSEL_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// OAuth2 token endpoint
    #[arg(long, global = true, env = "KESSEL_TOKEN_ENDPOINT")]
    pub token_endpoint: Option<String>,

    /// OIDC issuer, used to discover the token endpoint
    #[arg(long, global = true, env = "KESSEL_ISSUER_URL")]
    pub issuer_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Report a resource to the inventory
    Report {
        /// Resource as type:id@reporter (e.g., document:doc-123@drive)
        resource: ResourceArg,

        /// Instance of the reporter sending the report
        #[arg(long)]
        reporter_instance_id: String,

        /// API link to the resource
        #[arg(long)]
        api_href: String,

        /// Console link to the resource
        #[arg(long)]
        console_href: Option<String>,

        /// Version of the reporter
        #[arg(long)]
        reporter_version: Option<String>,

        /// Attributes shared by all reporters, as a JSON object
        #[arg(long)]
        common: Option<String>,

        /// Reporter-specific attributes, as a JSON object
        #[arg(long)]
        attributes: Option<String>,

        /// Wait until the report is visible to subsequent checks
        #[arg(long)]
        immediate: bool,
    },

    /// Check whether a subject has a relation to an object
    Check(CheckArgs),

    /// Check against the latest state, for use before updates
    CheckForUpdate(CheckArgs),

    /// Delete a reported resource
    Delete {
        /// Resource as type:id@reporter
        resource: ResourceArg,
    },

    /// List the objects of a type the subject has a relation to
    ListObjects {
        /// Object type as type@reporter (e.g., document@drive)
        object_type: ObjectTypeArg,

        /// Relation to look up (e.g., view)
        relation: String,

        /// Subject as type:id@reporter (e.g., principal:sarah@rbac)
        subject: ResourceArg,

        /// Relation of the subject, for subject sets
        #[arg(long)]
        subject_relation: Option<String>,

        /// Page size requested from the server
        #[arg(long)]
        limit: Option<u32>,
    },
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Object as type:id@reporter (e.g., document:doc-123@drive)
    pub object: ResourceArg,

    /// Relation to check (e.g., view)
    pub relation: String,

    /// Subject as type:id@reporter (e.g., principal:sarah@rbac)
    pub subject: ResourceArg,

    /// Relation of the subject, for subject sets
    #[arg(long)]
    pub subject_relation: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check() {
        let cli = Cli::try_parse_from([
            "kessel",
            "--endpoint",
            "localhost:9000",
            "--insecure",
            "check",
            "document:doc-123@drive",
            "view",
            "principal:sarah@rbac",
        ])
        .unwrap();

        assert_eq!(cli.connection.endpoint.as_deref(), Some("localhost:9000"));
        assert!(cli.connection.insecure);
        match cli.command {
            Commands::Check(args) => {
                assert_eq!(args.object.resource_id, "doc-123");
                assert_eq!(args.relation, "view");
                assert_eq!(args.subject.reporter.as_deref(), Some("rbac"));
            }
            _ => panic!("expected check"),
        }
    }

    #[test]
    fn test_rejects_malformed_reference() {
        let result = Cli::try_parse_from(["kessel", "delete", "doc-123"]);
        assert!(result.is_err());
    }
}
