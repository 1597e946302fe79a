use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use blockfs::layout::Layout;
use blockfs::{FileBlockDevice, FileSystem, InodeKind};
use tracing::info;

use crate::cli::{Cli, Command};

type ImageFs<'a> = FileSystem<&'a mut FileBlockDevice>;

pub fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    match &cli.command {
        Command::Format => format_image(&cli.image, cli.blocks, out),
        Command::Ls { path } => with_volume(&cli.image, |fs| {
            let entries = fs
                .list_dir(path)
                .with_context(|| format!("cannot list {path}"))?;
            for entry in entries {
                writeln!(
                    out,
                    "{}\t{}\t{}",
                    entry.inode_id,
                    kind_label(entry.kind),
                    entry.display_name()
                )?;
            }
            Ok(())
        }),
        Command::Create { name } => with_volume(&cli.image, |fs| {
            let inode_id = fs
                .create_entry_in_root(name)
                .with_context(|| format!("cannot create {name}"))?;
            writeln!(out, "{inode_id}")?;
            Ok(())
        }),
        Command::Stat { name } => with_volume(&cli.image, |fs| {
            let inode = fs
                .get_root_entry_inode(name)
                .with_context(|| format!("cannot stat {name}"))?;
            let block = inode
                .direct_block
                .map_or_else(|| "-".to_string(), |n| n.to_string());
            writeln!(out, "name:  {name}")?;
            writeln!(out, "kind:  {}", kind_label(inode.kind))?;
            writeln!(out, "size:  {}", inode.size)?;
            writeln!(out, "block: {block}")?;
            Ok(())
        }),
        Command::Write { name, input } => {
            let data = std::fs::read(input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            with_volume(&cli.image, |fs| {
                fs.write_root_file(name, &data)
                    .with_context(|| format!("cannot write {name}"))?;
                info!(name, bytes = data.len(), "wrote file");
                Ok(())
            })
        }
        Command::Cat { name } => with_volume(&cli.image, |fs| {
            let data = fs
                .read_root_file(name)
                .with_context(|| format!("cannot read {name}"))?;
            out.write_all(&data)?;
            Ok(())
        }),
    }
}

// The layout is checked before the image is touched; opening resizes it.
fn format_image(image: &Path, blocks: u32, out: &mut impl Write) -> Result<()> {
    let layout = Layout::new(blocks)
        .with_context(|| format!("cannot format {} with {blocks} blocks", image.display()))?;
    let mut dev = FileBlockDevice::open(image, blocks)?;
    FileSystem::new(&mut dev)?.format();
    dev.flush()?;
    writeln!(
        out,
        "formatted {}: {blocks} blocks, {} data blocks",
        dev.path().display(),
        layout.data_block_count
    )?;
    Ok(())
}

// Non-format commands never resize: the block count comes from the image.
fn with_volume<T>(image: &Path, op: impl FnOnce(&mut ImageFs<'_>) -> Result<T>) -> Result<T> {
    let mut dev = FileBlockDevice::open_existing(image)?;
    let result = {
        let mut fs = FileSystem::new(&mut dev)?;
        op(&mut fs)?
    };
    dev.flush()?;
    Ok(result)
}

const fn kind_label(kind: InodeKind) -> &'static str {
    match kind {
        InodeKind::File => "file",
        InodeKind::Directory => "dir",
    }
}
