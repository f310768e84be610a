mod cli;
mod workflow;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;

fn main() -> Result<()> {
    // コマンドライン引数を解析し、設定を組み立てます
    let config = cli::Args::parse().into_config();

    // RUST_LOG が指定されていればそちらを優先します
    env_logger::Builder::new()
        .filter_level(config.log_level)
        .format(|buf, record| writeln!(buf, "{}:{}", record.level(), record.args()))
        .parse_default_env()
        .init();

    workflow::run(&config).with_context(|| {
        format!(
            "フォルダ {} の処理を完了できませんでした",
            config.folder.display()
        )
    })?;

    Ok(())
}
