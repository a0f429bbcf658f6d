//! Coworking Policy - command line entry point
//!
//! Evaluates access checks and booking rules and prints the outcome as JSON.

use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use cw_common::User;
use tracing::{debug, info};
use uuid::Uuid;

use cw_policy::bookings::BookingRules;
use cw_policy::config::BookingPolicy;
use cw_policy::permissions::{check_access, permissions_for, AccessRequest, Role};
use cw_policy::Decision;

/// Inspect the coworking access policy
#[derive(Parser, Debug)]
#[command(name = "cw-policy", version, about = "Coworking access policy and booking rules")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the permissions granted to a role
    Permissions {
        /// guest, user or admin
        role: Role,
    },

    /// Evaluate an access check
    Check {
        /// booking, post or room
        #[arg(long)]
        resource: String,
        /// Action on the resource, e.g. view or cancel
        #[arg(long)]
        action: String,
        /// Acting user; omit for a signed-out visitor
        #[arg(long)]
        user_id: Option<Uuid>,
        /// Treat the acting user as an administrator
        #[arg(long)]
        admin: bool,
        /// Owner of the booking or author of the post
        #[arg(long)]
        owner_id: Option<Uuid>,
    },

    /// Validate the time window of a new booking
    ValidateBooking {
        /// RFC 3339 start, e.g. 2024-01-02T10:00:00Z
        #[arg(long)]
        start: DateTime<Utc>,
        /// RFC 3339 end
        #[arg(long)]
        end: DateTime<Utc>,
        /// Evaluate as of this instant instead of the current time
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },

    /// Check whether a booking may still be cancelled
    CheckCancel {
        /// RFC 3339 start of the booking
        #[arg(long)]
        start: DateTime<Utc>,
        /// Evaluate as of this instant instead of the current time
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },
}

fn main() -> Result<ExitCode> {
    // Logs go to stderr so stdout stays machine readable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cw_policy=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Permissions { role } => {
            let names: Vec<&str> = permissions_for(role)
                .permissions()
                .map(|p| p.as_str())
                .collect();
            println!("{}", serde_json::to_string_pretty(&names)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check {
            resource,
            action,
            user_id,
            admin,
            owner_id,
        } => {
            let user = user_id.map(|id| User::new(id, admin));
            if admin && user.is_none() {
                info!("--admin has no effect without --user-id");
            }

            let decision = match AccessRequest::parse(&resource, &action, owner_id) {
                Ok(request) if check_access(user.as_ref(), &request) => Decision::allow(),
                Ok(_) => Decision::deny("Access denied"),
                Err(e) => {
                    debug!(error = %e, "Rejected malformed access check");
                    Decision::deny(e.to_string())
                }
            };
            emit(&decision)
        }
        Commands::ValidateBooking { start, end, now } => {
            let rules = load_rules()?;
            let now = now.unwrap_or_else(Utc::now);
            emit(&Decision::from(rules.validate_window(start, end, now)))
        }
        Commands::CheckCancel { start, now } => {
            let rules = load_rules()?;
            let now = now.unwrap_or_else(Utc::now);
            emit(&Decision::from(rules.check_cancellation_window(start, now)))
        }
    }
}

fn load_rules() -> Result<BookingRules> {
    let policy = BookingPolicy::from_env().context("Invalid booking policy configuration")?;
    debug!(?policy, "Loaded booking policy");
    Ok(BookingRules::new(policy))
}

fn emit(decision: &Decision) -> Result<ExitCode> {
    println!("{}", serde_json::to_string(decision)?);
    Ok(if decision.allowed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
