use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use mpegts_psi::dump::{Options, TableKind, run};

#[derive(Parser)]
#[command(name = "psi-dump", about = "Decode one PAT / CAT / PMT section to JSON")]
struct Opt {
    /// File holding exactly one section ("-" reads stdin)
    input: PathBuf,

    /// Decoder to use
    #[arg(long, value_enum, default_value_t = TableKind::Auto)]
    table: TableKind,

    /// Print single-line JSON
    #[arg(long, default_value_t = false)]
    compact: bool,

    /// Bytes to drop before the section (pointer_field + filler)
    #[arg(long, default_value_t = 0)]
    skip: usize,
}

fn read_input(path: &PathBuf) -> anyhow::Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf).context("reading stdin")?;
        Ok(buf)
    } else {
        std::fs::read(path).with_context(|| format!("reading {}", path.display()))
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opt = Opt::parse();

    let data = read_input(&opt.input)?;
    log::debug!("read {} bytes from {}", data.len(), opt.input.display());

    let json = run(
        &Options {
            table: opt.table,
            pretty: !opt.compact,
            skip: opt.skip,
        },
        &data,
    )?;
    println!("{json}");
    Ok(())
}
