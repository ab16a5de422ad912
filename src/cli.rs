use clap::Parser;

#[derive(Parser)]
#[command(
    name = "img-convert",
    about = "Batch image converter with URL fetching, cover-fit cropping and size reporting",
    long_about = "img-convert converts images from local paths, directories or URLs to webp or png, \
                  with optional quality adjustment and cover-fit cropping. Outputs land in an \
                  'optimized' directory beside each source file, and a before/after size report \
                  is printed at the end. Run without arguments for the interactive prompts.",
    version = "0.1.0",
    after_help = "EXAMPLES:\n  \
    img-convert ./photos -f webp -q 85\n  \
    img-convert image.jpg https://example.com/pic.png -f png\n  \
    img-convert banner.jpg -w 800 -H 600\n  \
    img-convert    (interactive mode)"
)]
pub struct Args {
    #[arg(
        help = "Input files, directories or URLs",
        long_help = "Any mix of local image files, directories (immediate image entries are \
                     picked up) and http(s) URLs (downloaded first). When omitted, the inputs \
                     and all options are prompted for interactively."
    )]
    pub inputs: Vec<String>,

    #[arg(
        short = 'f',
        long,
        help = "Output format (webp, png; default: webp)",
        long_help = "Target format for every file in the batch. Supported: webp, png."
    )]
    pub format: Option<String>,

    #[arg(
        short = 'q',
        long,
        help = "Quality 0-100 (default: 80)",
        long_help = "Quality from 0 to 100, clamped into range. Drives the PNG optimization \
                     level tiers."
    )]
    pub quality: Option<i64>,

    #[arg(
        short = 'w',
        long,
        requires = "height",
        help = "Crop box width in pixels",
        long_help = "Together with --height forms the cover-fit crop box: images are scaled to \
                     fully cover the box, then center-cropped."
    )]
    pub width: Option<u32>,

    #[arg(
        short = 'H',
        long,
        requires = "width",
        help = "Crop box height in pixels",
        long_help = "Together with --width forms the cover-fit crop box."
    )]
    pub height: Option<u32>,

    #[arg(long, help = "Suppress status output (final report still prints)")]
    pub quiet: bool,

    #[arg(short = 'v', long, help = "Verbose status output")]
    pub verbose: bool,
}
