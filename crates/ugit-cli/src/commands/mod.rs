pub mod add;
pub mod branch;
pub mod cat_file;
pub mod checkout;
pub mod commit;
pub mod diff;
pub mod fetch;
pub mod graph;
pub mod hash_object;
pub mod init;
pub mod log;
pub mod merge;
pub mod merge_base;
pub mod push;
pub mod read_tree;
pub mod reset;
pub mod show;
pub mod status;
pub mod tag;
pub mod write_tree;

use anyhow::{Context, Result};
use clap::Subcommand;
use ugit_repository::Repository;

use crate::Cli;

#[derive(Subcommand)]
pub enum Commands {
    /// Create an empty repository
    Init(init::InitArgs),
    /// Store a file as a blob and print its object id
    HashObject(hash_object::HashObjectArgs),
    /// Print an object's raw payload
    CatFile(cat_file::CatFileArgs),
    /// Record the index as a tree object and print its id
    WriteTree(write_tree::WriteTreeArgs),
    /// Replace the index with the contents of a tree
    ReadTree(read_tree::ReadTreeArgs),
    /// Record a commit from the index
    Commit(commit::CommitArgs),
    /// Show commit history
    Log(log::LogArgs),
    /// Show a commit and its changes
    Show(show::ShowArgs),
    /// Show differences between trees, index, and working tree
    Diff(diff::DiffArgs),
    /// Materialize a commit and move HEAD there
    Checkout(checkout::CheckoutArgs),
    /// Create a tag
    Tag(tag::TagArgs),
    /// List branches or create one
    Branch(branch::BranchArgs),
    /// Summarize the state of the working tree and index
    Status(status::StatusArgs),
    /// Move HEAD (and its branch) to a commit
    Reset(reset::ResetArgs),
    /// Merge another commit into HEAD
    Merge(merge::MergeArgs),
    /// Print the common ancestor of two commits
    #[command(alias = "merge_base")]
    MergeBase(merge_base::MergeBaseArgs),
    /// Copy missing objects from another repository and mirror its branches
    Fetch(fetch::FetchArgs),
    /// Send missing objects to another repository and update its branch
    Push(push::PushArgs),
    /// Stage files or directories into the index
    Add(add::AddArgs),
    /// Export the commit graph as Graphviz DOT text
    K(graph::GraphArgs),
}

pub fn run(cli: Cli) -> Result<i32> {
    match &cli.command {
        Commands::Init(args) => init::run(args),
        Commands::HashObject(args) => hash_object::run(args),
        Commands::CatFile(args) => cat_file::run(args),
        Commands::WriteTree(args) => write_tree::run(args),
        Commands::ReadTree(args) => read_tree::run(args),
        Commands::Commit(args) => commit::run(args),
        Commands::Log(args) => log::run(args),
        Commands::Show(args) => show::run(args),
        Commands::Diff(args) => diff::run(args),
        Commands::Checkout(args) => checkout::run(args),
        Commands::Tag(args) => tag::run(args),
        Commands::Branch(args) => branch::run(args),
        Commands::Status(args) => status::run(args),
        Commands::Reset(args) => reset::run(args),
        Commands::Merge(args) => merge::run(args),
        Commands::MergeBase(args) => merge_base::run(args),
        Commands::Fetch(args) => fetch::run(args),
        Commands::Push(args) => push::run(args),
        Commands::Add(args) => add::run(args),
        Commands::K(args) => graph::run(args),
    }
}

/// Open the repository in the current working directory.
pub fn open_repo() -> Result<Repository> {
    let cwd = std::env::current_dir()?;
    Repository::open(&cwd).with_context(|| {
        format!(
            "not a ugit repository (no .ugit directory in {})",
            cwd.display()
        )
    })
}
