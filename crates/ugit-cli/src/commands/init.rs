use anyhow::Result;
use clap::Args;
use ugit_repository::{Repository, REPO_DIR_NAME};

#[derive(Args)]
pub struct InitArgs {}

pub fn run(_args: &InitArgs) -> Result<i32> {
    let cwd = std::env::current_dir()?;
    Repository::init(&cwd)?;
    println!(
        "Initialized empty ugit repository in {}",
        cwd.join(REPO_DIR_NAME).display()
    );
    Ok(0)
}
