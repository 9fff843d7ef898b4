use anyhow::Result;
use calgrid_core::calgrid_config::CalgridConfig;
use owo_colors::OwoColorize;

pub fn run(config: &CalgridConfig) -> Result<()> {
    let config_path = CalgridConfig::config_path()?;

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!("  Data:       {}", config.data_path().display());
    println!();
    println!("{}", "Settings".bold());
    println!("  Preview limit:  {}", config.preview_limit);

    Ok(())
}
