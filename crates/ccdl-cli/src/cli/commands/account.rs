//! `ccdl account` – show the session's user and entitlement accounts.

use anyhow::Result;
use ccdl_core::download::DownloadSource;

use super::{blocking, Resolver};

pub async fn run_account(resolver: &Resolver) -> Result<()> {
    let (user, info) = blocking(resolver, |r| {
        let source = r.source();
        Ok((source.current_user()?, source.account_info()?))
    })
    .await?;

    println!("User: {} {} ({})", user.first_name, user.last_name, info.user_type);
    if info.accounts.is_empty() {
        println!("No entitlement accounts.");
        return Ok(());
    }
    println!("{:<8} {:<16} {}", "DEFAULT", "EA NUMBER", "EA NAME");
    for a in &info.accounts {
        let marker = if a.is_default_account() { "*" } else { "" };
        println!("{:<8} {:<16} {}", marker, a.ea_number, a.ea_name);
    }
    Ok(())
}
