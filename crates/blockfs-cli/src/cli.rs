use std::path::PathBuf;

use clap::{Parser, Subcommand};

use blockfs::constants::DEFAULT_TOTAL_BLOCKS;
use blockfs::fs::ROOT_PATH;

#[derive(Parser, Debug)]
#[command(name = "blockfs-cli", author, version, about = "Format and inspect blockfs disk images")]
pub struct Cli {
    /// Disk image backing the volume.
    #[arg(long, env = "BLOCKFS_IMAGE", default_value = "blockfs.img")]
    pub image: PathBuf,

    /// Image size in blocks; only `format` applies it.
    #[arg(long, env = "BLOCKFS_BLOCKS", default_value_t = DEFAULT_TOTAL_BLOCKS)]
    pub blocks: u32,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create or resize the image and write an empty filesystem.
    Format,

    /// List a directory.
    Ls {
        #[arg(default_value = ROOT_PATH)]
        path: String,
    },

    /// Create an empty file in the root directory.
    Create { name: String },

    /// Show the inode behind a root entry.
    Stat { name: String },

    /// Replace a file's content with the bytes of a host file.
    Write {
        name: String,

        #[arg(long)]
        input: PathBuf,
    },

    /// Print a file's content to stdout.
    Cat { name: String },
}
