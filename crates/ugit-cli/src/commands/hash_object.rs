use anyhow::Result;
use clap::Args;
use ugit_object::ObjectType;

use super::open_repo;

#[derive(Args)]
pub struct HashObjectArgs {
    /// File to store
    pub file: std::path::PathBuf,
}

pub fn run(args: &HashObjectArgs) -> Result<i32> {
    let repo = open_repo()?;
    let data = std::fs::read(&args.file)?;
    let oid = repo.objects().write(ObjectType::Blob, &data)?;
    println!("{oid}");
    Ok(0)
}
