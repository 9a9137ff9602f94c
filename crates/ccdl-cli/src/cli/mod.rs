//! CLI for the CCDL download client.

mod commands;

use anyhow::Result;
use ccdl_core::config;
use ccdl_core::DlgType;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::{Path, PathBuf};

use commands::{
    open_resolver, run_account, run_checksum, run_completions, run_download, run_eula, run_files,
    run_man, run_products, run_resolve, run_subproducts, run_versions, DownloadRequest, Target,
};

/// Top-level CLI for the CCDL download client.
#[derive(Debug, Parser)]
#[command(name = "ccdl")]
#[command(about = "CCDL: resolve and download products from the vendor catalog", long_about = None)]
pub struct Cli {
    /// Catalog view: PRODUCT_BINARY, DRIVERS_TOOLS, CUSTOM_ISO or ADDONS.
    #[arg(long = "type", global = true, default_value = "PRODUCT_BINARY", value_name = "TYPE")]
    pub dlg_type: DlgType,

    /// Trace catalog requests and normalization rules in the log.
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// List product families.
    Products,

    /// List the sub-products of a product family.
    Subproducts {
        /// Product family slug, e.g. vmware_vsphere.
        slug: String,
    },

    /// List the versions of a sub-product, newest first.
    Versions {
        slug: String,
        /// Canonical sub-product code, e.g. esxi.
        subproduct: String,
    },

    /// Resolve a version (literal or single `*` glob) to its download group.
    Resolve {
        slug: String,
        subproduct: String,
        version: String,
    },

    /// List the files of a resolved version.
    Files {
        slug: String,
        subproduct: String,
        version: String,
    },

    /// Print the EULA link of a resolved version (requires a session).
    Eula {
        slug: String,
        subproduct: String,
        version: String,
    },

    /// Show the logged-in user and entitlement accounts (requires a session).
    Account,

    /// Download the files of a resolved version matching a file glob.
    Download {
        slug: String,
        subproduct: String,
        version: String,
        /// Shell glob over file names, e.g. '*.iso'.
        file_glob: String,
        /// Accept the EULA if it has not been accepted yet.
        #[arg(long)]
        accept_eula: bool,
        /// Directory to write files into (default: current directory).
        #[arg(long, short = 'o', value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Compute SHA-256 of a file (e.g. after download).
    Checksum {
        /// Path to the file.
        path: String,
    },

    /// Print shell completions.
    Completions {
        shell: Shell,
    },

    /// Print the man page.
    Man,
}

impl Cli {
    /// Dispatches the parsed command.
    pub async fn run(self) -> Result<()> {
        let dlg_type = self.dlg_type;

        // Commands that never touch the catalog.
        match &self.command {
            CliCommand::Checksum { path } => return run_checksum(Path::new(path)).await,
            CliCommand::Completions { shell } => return run_completions(*shell),
            CliCommand::Man => return run_man(),
            _ => {}
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let resolver = open_resolver(&cfg)?;

        match self.command {
            CliCommand::Products => run_products(&resolver).await?,
            CliCommand::Account => run_account(&resolver).await?,
            CliCommand::Subproducts { slug } => run_subproducts(&resolver, slug, dlg_type).await?,
            CliCommand::Versions { slug, subproduct } => {
                run_versions(&resolver, slug, subproduct, dlg_type).await?
            }
            CliCommand::Resolve {
                slug,
                subproduct,
                version,
            } => run_resolve(&resolver, Target::new(slug, subproduct, version, dlg_type)).await?,
            CliCommand::Files {
                slug,
                subproduct,
                version,
            } => run_files(&resolver, Target::new(slug, subproduct, version, dlg_type)).await?,
            CliCommand::Eula {
                slug,
                subproduct,
                version,
            } => run_eula(&resolver, Target::new(slug, subproduct, version, dlg_type)).await?,
            CliCommand::Download {
                slug,
                subproduct,
                version,
                file_glob,
                accept_eula,
                output,
            } => {
                let output = match output {
                    Some(dir) => dir,
                    None => std::env::current_dir()?,
                };
                let request = DownloadRequest {
                    target: Target::new(slug, subproduct, version, dlg_type),
                    file_glob,
                    accept_eula,
                    output,
                };
                run_download(&resolver, request).await?;
            }
            CliCommand::Checksum { .. } | CliCommand::Completions { .. } | CliCommand::Man => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
