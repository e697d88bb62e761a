//! One-shot member-number rewrite over the whole members collection.
//!
//! Every member is renumbered with a single fixed (initials, order) pair and
//! sequences assigned in `_id` order; previous numbers are kept in
//! `old_member_number`. Running twice rewrites twice.

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use welfare_config::Settings;
use welfare_db::connect;
use welfare_services::dao::MemberDao;
use welfare_services::migration;

#[derive(Parser)]
#[command(name = "welfare-migrate", about = "Renumber all members with a fixed prefix")]
struct Args {
    /// Collector initials for the new numbers (default from config)
    #[arg(long)]
    initials: Option<String>,

    /// Collector order digit for the new numbers (default from config)
    #[arg(long)]
    order: Option<u32>,

    /// Plan the assignments and print them without writing anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "welfare_migrate=info,welfare_services=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let settings = Settings::load()?;

    let initials = args
        .initials
        .unwrap_or_else(|| settings.migration.collector_initials.clone());
    let order = args.order.unwrap_or(settings.migration.collector_order);

    let db = connect(&settings).await?;
    let members = MemberDao::new(&db);

    if args.dry_run {
        let all = members.find_all_in_id_order().await?;
        let assignments = migration::plan(&all, &initials, order)?;
        for a in &assignments {
            println!(
                "{} {} -> {}",
                a.member_id.to_hex(),
                a.old_number.as_deref().unwrap_or("-"),
                a.new_number
            );
        }
        info!(total = assignments.len(), "Dry run complete; nothing written");
        return Ok(());
    }

    match migration::run(&members, &initials, order).await {
        Ok(report) => {
            info!(
                total = report.total,
                rewritten = report.rewritten,
                "Migration finished"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Migration aborted; members already rewritten keep their new numbers");
            Err(e.into())
        }
    }
}
