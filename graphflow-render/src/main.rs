use graphflow_render::{load_scene, Renderer, RendererConfig, RenderResult};
use std::{env, path::Path, process};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = env::args().skip(1);
    let (Some(scene_path), Some(out_path)) = (args.next(), args.next()) else {
        eprintln!("Usage: graphflow-render <scene.json> <out.svg|out.png>");
        process::exit(1);
    };

    match run(&scene_path, &out_path).await {
        Ok(()) => println!("Wrote {out_path}"),
        Err(error) => {
            eprintln!("{error}");
            process::exit(1);
        }
    }
}

async fn run(scene_path: &str, out_path: &str) -> RenderResult<()> {
    // Parse first: a bad scene must fail before a browser is launched.
    let scene = load_scene(Path::new(scene_path))?;
    Renderer::new(RendererConfig::default())
        .render_to_file(&scene, Path::new(out_path))
        .await
}
