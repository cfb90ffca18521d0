use anyhow::Result;

fn main() -> Result<()> {
    httpgen_cli::main_entry()
}
