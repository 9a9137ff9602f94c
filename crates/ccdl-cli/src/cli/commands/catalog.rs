//! Read-only catalog commands: products, subproducts, versions, resolve, files.

use anyhow::Result;
use ccdl_core::DlgType;

use super::{blocking, Resolver, Target};

pub async fn run_products(resolver: &Resolver) -> Result<()> {
    let families = blocking(resolver, |r| Ok(r.families()?)).await?;
    println!("{:<40} {:<40} {}", "SLUG", "CATEGORY", "NAME");
    for f in families {
        println!("{:<40} {:<40} {}", f.slug, f.category, f.display_name);
    }
    Ok(())
}

pub async fn run_subproducts(resolver: &Resolver, slug: String, dlg_type: DlgType) -> Result<()> {
    let subs = blocking(resolver, move |r| Ok(r.sub_products(&slug, dlg_type)?)).await?;
    if subs.is_empty() {
        println!("No sub-products found.");
        return Ok(());
    }
    println!("{:<32} {:<60} {}", "CODE", "NAME", "MAJOR VERSIONS");
    for s in subs {
        let buckets: Vec<&str> = s.releases.keys().map(String::as_str).collect();
        println!("{:<32} {:<60} {}", s.code, s.name, buckets.join(","));
    }
    Ok(())
}

pub async fn run_versions(
    resolver: &Resolver,
    slug: String,
    subproduct: String,
    dlg_type: DlgType,
) -> Result<()> {
    let versions =
        blocking(resolver, move |r| Ok(r.versions(&slug, &subproduct, dlg_type)?)).await?;
    for v in versions {
        println!("{v}");
    }
    Ok(())
}

pub async fn run_resolve(resolver: &Resolver, t: Target) -> Result<()> {
    let d = blocking(resolver, move |r| {
        Ok(r.dlg_product(&t.slug, &t.subproduct, &t.version, t.dlg_type)?)
    })
    .await?;
    println!("version:        {}", d.version);
    println!("major version:  {}", d.major_version);
    println!("download group: {}", d.download_group);
    println!("product id:     {}", d.product_id);
    Ok(())
}

pub async fn run_files(resolver: &Resolver, t: Target) -> Result<()> {
    let files = blocking(resolver, move |r| {
        Ok(r.files(&t.slug, &t.subproduct, &t.version, t.dlg_type)?)
    })
    .await?;
    for f in files {
        println!("{f}");
    }
    Ok(())
}
