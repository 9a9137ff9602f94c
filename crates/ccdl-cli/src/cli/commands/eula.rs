//! `ccdl eula <slug> <subproduct> <version>` – print the EULA link.

use anyhow::Result;

use super::{blocking, Resolver, Target};

pub async fn run_eula(resolver: &Resolver, t: Target) -> Result<()> {
    let url = blocking(resolver, move |r| {
        Ok(r.eula_url(&t.slug, &t.subproduct, &t.version, t.dlg_type)?)
    })
    .await?;
    println!("{url}");
    Ok(())
}
