use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use casepack::config::{CipherConfig, DataPaths, DatasetVariant};
use casepack::crypto::SecureString;
use casepack::services::{run_conversion, ConvertOptions};

#[derive(Parser)]
#[command(
    name = "casepack",
    version,
    about = "Packages case study data as password-encrypted artifacts",
    long_about = "casepack joins the ranked mechanism cases with their posts, \
                  comments, view series, and exploration analytics, and writes \
                  a public metadata summary next to an encrypted case bundle \
                  that the static viewer decrypts in the browser."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Join the source tables and write encrypted artifacts
    Convert {
        /// Root of the source data tree
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Directory the artifacts are written to
        #[arg(long, default_value = "site/public/data")]
        output_dir: PathBuf,

        /// Which dataset variant to produce
        #[arg(long, value_enum, default_value_t = DatasetVariant::Daily)]
        variant: DatasetVariant,

        /// Encryption password (prompted for when omitted)
        #[arg(long, env = "CASEPACK_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Override the PBKDF2 iteration count
        #[arg(long)]
        iterations: Option<u32>,

        /// Half-width of the peak self-view window, in days
        #[arg(long, default_value_t = 3)]
        peak_window_days: i64,
    },

    /// Show the resolved paths and stored cipher parameters
    Config {
        /// Root of the source data tree
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Directory the artifacts are written to
        #[arg(long, default_value = "site/public/data")]
        output_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            data_dir,
            output_dir,
            variant,
            password,
            iterations,
            peak_window_days,
        } => {
            let paths = DataPaths::new(data_dir, output_dir);
            let password = match password {
                Some(value) => SecureString::new(value),
                None => SecureString::new(rpassword::prompt_password("Encryption password: ")?),
            };
            let options = ConvertOptions {
                variant,
                peak_window_days,
                iterations,
            };
            let summary = run_conversion(&paths, &password, &options)?;
            println!(
                "Done: {} cases encrypted ({} iterations, {} variant)",
                summary.case_count, summary.config.iterations, variant
            );
        }
        Commands::Config {
            data_dir,
            output_dir,
        } => {
            let paths = DataPaths::new(data_dir, output_dir);
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Output directory: {}", paths.output_dir().display());
            println!("Mechanisms:       {}", paths.mechanisms_file().display());
            println!("Posts:            {}", paths.posts_file().display());
            println!("Daily views:      {}", paths.daily_views_file().display());
            println!("Exploration:      {}", paths.exploration_file().display());
            println!("Superusers:       {}", paths.superusers_file().display());
            println!("Pageviews:        {}", paths.pageviews_file().display());
            match CipherConfig::load(&paths.cipher_config_file())? {
                Some(config) => println!(
                    "Cipher config:    {} ({} iterations, {}-bit {})",
                    paths.cipher_config_file().display(),
                    config.iterations,
                    config.key_size,
                    config.algorithm
                ),
                None => println!("Cipher config:    not yet written"),
            }
        }
    }

    Ok(())
}
