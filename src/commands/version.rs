use anyhow::Result;

pub fn execute() -> Result<()> {
    println!("hostmon version {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
