mod app;
mod camera;
mod config;
mod input;
mod renderer;
mod scene;

fn main() -> anyhow::Result<()>
{
  // wgpu validation errors and warnings go to the console.
  // RUST_LOG=wgpu=debug (or tower_native=debug) gives more verbose output.
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info,wgpu_hal=off,naga=warn"))
    .init();

  let config = config::Config::load()?;
  app::run(config)
}
