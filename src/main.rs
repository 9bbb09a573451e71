//! Host-side preview: `cargo run --bin preview` builds the wasm bundle into
//! `static/pkg` and serves `static/` locally.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    preview::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod preview {
    use std::path::PathBuf;
    use std::process::{Command, Stdio};

    use anyhow::{bail, Context};
    use clap::Parser;

    #[derive(Debug, Parser)]
    #[command(about = "Build the canvas bundle and serve the site locally")]
    struct Args {
        /// Port for the local HTTP server.
        #[arg(long, default_value_t = 8000)]
        port: u16,
        /// Directory holding index.html; the bundle goes to `<site>/pkg`.
        #[arg(long, default_value = "static")]
        site: PathBuf,
        /// Serve whatever bundle is already there.
        #[arg(long)]
        skip_build: bool,
    }

    pub fn run() -> anyhow::Result<()> {
        let args = Args::parse();

        if !args.skip_build {
            build_bundle(&args.site)?;
        }

        println!("Serving {} at http://127.0.0.1:{} …", args.site.display(), args.port);
        let status = Command::new("python3")
            .args(["-m", "http.server", &args.port.to_string(), "--directory"])
            .arg(&args.site)
            .stdout(Stdio::null())
            .status()
            .context("failed to start python3 http.server")?;
        if !status.success() {
            bail!("http server exited with {status}");
        }
        Ok(())
    }

    fn build_bundle(site: &std::path::Path) -> anyhow::Result<()> {
        println!("Building WASM pkg …");
        let status = Command::new("wasm-pack")
            .args(["build", "--release", "--target", "web", "--out-dir"])
            .arg(site.join("pkg"))
            .status()
            .context(
                "wasm-pack not found in PATH (https://rustwasm.github.io/wasm-pack/); \
                 rerun with --skip-build to serve a stale bundle",
            )?;
        if !status.success() {
            bail!("wasm-pack finished with {status}");
        }
        Ok(())
    }
}
