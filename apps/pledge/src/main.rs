use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use pledge_wall::{aggregate, certificate, ShareChain, WallState};
use serde::Serialize;
use shared::{
    domain::{
        is_known_commitment, is_known_region, PledgeDraft, PledgeId, ProfileCategory, Selection,
        COMMITMENT_CHECKLIST, REGIONS,
    },
    error::{ErrorReport, PledgeError},
    view::{ShareMessage, ShareOutcome},
};
use storage::{FileStore, PledgeStore};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod render;

use config::load_settings;

#[derive(Parser, Debug)]
#[command(name = "pledge", about = "Record climate pledges and browse the pledge wall")]
struct Cli {
    /// Config file, `pledge.toml` in the working directory when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record a new pledge and print its certificate.
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        region: String,
        #[arg(long)]
        profile: ProfileCategory,
        #[arg(long = "commitment")]
        commitments: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    /// Show one page of the pledge wall.
    Wall {
        #[arg(long, default_value = "all")]
        profile: Selection<ProfileCategory>,
        #[arg(long, default_value = "all")]
        region: Selection<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long)]
        json: bool,
    },
    /// Pledge counters.
    Stats {
        #[arg(long)]
        json: bool,
    },
    /// Print the certificate for one pledge, optionally saving it to a file.
    Certificate {
        id: PledgeId,
        #[arg(long)]
        json: bool,
        /// Save the certificate, to `climate-pledge-certificate.txt` when no path is given.
        #[arg(
            long,
            value_name = "PATH",
            num_args = 0..=1,
            default_missing_value = render::DEFAULT_CERTIFICATE_FILE
        )]
        output: Option<PathBuf>,
    },
    /// Share a pledge: native share command, clipboard, then manual copy.
    Share { id: PledgeId },
    /// List the commitment checklist and regions offered by the form.
    Options,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = load_settings(cli.config.as_deref())?;
    if let Some(dir) = cli.storage_dir {
        settings.storage_dir = dir;
    }

    let open_store = || -> Result<PledgeStore<FileStore>> {
        Ok(PledgeStore::load(FileStore::open(&settings.storage_dir)?))
    };

    match cli.command {
        Command::Submit {
            name,
            email,
            phone,
            region,
            profile,
            commitments,
            json,
        } => {
            if !is_known_region(&region) {
                warn!("region '{region}' is not in the form's region list");
            }
            for commitment in commitments.iter().filter(|c| !is_known_commitment(c)) {
                warn!("commitment '{commitment}' is not on the checklist");
            }

            let draft = PledgeDraft {
                name,
                email,
                phone,
                region,
                profile_category: profile,
                commitments,
            };
            let mut store = open_store()?;
            let record = match store.append(draft) {
                Ok(record) => record,
                Err(err @ PledgeError::Validation(_)) if json => {
                    print_json(&ErrorReport::from(&err))?;
                    std::process::exit(1);
                }
                Err(err) => return Err(err.into()),
            };

            let cert = certificate(&record);
            if json {
                print_json(&cert)?;
            } else {
                print!("{}", render::certificate_panel(&cert));
                println!();
                print!("{}", render::stats(&aggregate(store.records())));
            }
        }
        Command::Wall {
            profile,
            region,
            page,
            json,
        } => {
            let store = open_store()?;
            let mut state = WallState::new(settings.page_size);
            state.set_filters(profile, region);
            state.goto_page(page);
            let page = state.view(store.records());
            if json {
                print_json(&page)?;
            } else {
                print!("{}", render::wall_table(&page));
            }
        }
        Command::Stats { json } => {
            let store = open_store()?;
            let counts = aggregate(store.records());
            if json {
                print_json(&counts)?;
            } else {
                print!("{}", render::stats(&counts));
            }
        }
        Command::Certificate { id, json, output } => {
            let store = open_store()?;
            let record = store
                .get(id)
                .ok_or_else(|| anyhow!("no pledge with id {id}"))?;
            let cert = certificate(record);
            if json {
                print_json(&cert)?;
            } else {
                print!("{}", render::certificate_panel(&cert));
            }
            if let Some(path) = output {
                render::write_certificate(&path, &cert, json)?;
                info!(path = %path.display(), "certificate saved");
            }
        }
        Command::Share { id } => {
            let store = open_store()?;
            let record = store
                .get(id)
                .ok_or_else(|| anyhow!("no pledge with id {id}"))?;
            let message = ShareMessage::for_record(record, settings.share_url.clone());
            let chain = ShareChain::standard(settings.share_command.clone(), std::io::stdout());
            match chain.share(&message).await? {
                ShareOutcome::Shared => println!("Shared."),
                ShareOutcome::CopiedToClipboard => {
                    println!("Copied to clipboard! Paste it anywhere to share.")
                }
                ShareOutcome::ManualCopy => {}
            }
        }
        Command::Options => {
            println!("Commitments:");
            for commitment in COMMITMENT_CHECKLIST {
                println!("  {commitment}");
            }
            println!("Regions:");
            for region in REGIONS {
                println!("  {region}");
            }
        }
    }

    Ok(())
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
