use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Camera index (overrides config)
    #[arg(short, long)]
    pub cam_index: Option<u32>,

    /// Bind host for the web server (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port for the web server (overrides config)
    #[arg(long)]
    pub port: Option<u16>,

    /// Path to the hand landmark ONNX model (overrides config)
    #[arg(long)]
    pub model: Option<String>,

    /// Mirror the camera output (overrides config)
    #[arg(long, overrides_with = "no_mirror")]
    pub mirror: bool,

    /// Do not mirror the camera output (overrides config)
    #[arg(long, overrides_with = "mirror")]
    pub no_mirror: bool,

    /// List available cameras and exit
    #[arg(long)]
    pub list: bool,
}
