use clap::{Parser, Subcommand};
use glam::Vec3;
use tracing_subscriber::EnvFilter;
use verdant_common::{AnchorPose, Collider};
use verdant_field::{BladeData, Field};
use verdant_kernel::{FrameBuffers, KernelConfig, step_frame};

#[derive(Parser)]
#[command(name = "verdant-cli", about = "CLI driver for the verdant vegetation kernel")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions
    Info,
    /// Scatter a field of blades and step the kernel with a moving anchor
    Simulate {
        /// Number of blades to scatter
        #[arg(short, long, default_value = "10000")]
        blades: usize,
        /// Number of frames to simulate
        #[arg(short, long, default_value = "120")]
        frames: usize,
        /// Number of static colliders (alternating boxes and spheres)
        #[arg(short, long, default_value = "8")]
        colliders: usize,
        /// Scatter seed for deterministic placement
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("verdant-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", verdant_common::crate_info());
            println!("field:  {}", verdant_field::crate_info());
            println!("kernel: {}", verdant_kernel::crate_info());
        }
        Commands::Simulate {
            blades,
            frames,
            colliders,
            seed,
        } => {
            let config = KernelConfig::default();
            config.validate()?;

            println!(
                "Simulating {blades} blades, {colliders} colliders, {frames} frames (seed {seed})"
            );
            let mut field = scatter(blades, colliders, seed, &config);
            let mut buffers = FrameBuffers::with_capacity(blades);

            let mut total_recycled = 0usize;
            let mut total_blocked_frames = 0usize;
            let mut total_time = std::time::Duration::ZERO;
            let step_len = 0.5;

            for frame in 0..frames {
                // The anchor walks forward along +Z
                let anchor = AnchorPose::new(
                    Vec3::new(0.0, 1.7, frame as f32 * step_len),
                    Vec3::Z,
                    Vec3::X,
                );
                let stats = step_frame(&mut field, &anchor, &config, &mut buffers)?;
                total_recycled += stats.recycled;
                total_blocked_frames += stats.blocked;
                total_time += stats.frame_time;

                if frame % 30 == 0 {
                    println!(
                        "  frame {frame:4}: recycled={:5} swaying={:4} blocked={:4} ({:?})",
                        stats.recycled, stats.swaying, stats.blocked, stats.frame_time
                    );
                }
            }

            let suppressed = field.blades().values().filter(|b| b.suppressed).count();
            println!("Done.");
            println!("  total recycled:       {total_recycled}");
            println!("  blade-frames blocked: {total_blocked_frames}");
            println!("  suppressed at end:    {suppressed}");
            println!("  avg frame time:       {:?}", total_time / frames.max(1) as u32);
        }
    }

    Ok(())
}

/// Deterministic splitmix64 scatter: no RNG crate, identical fields for
/// identical seeds.
fn scatter(blades: usize, colliders: usize, seed: u64, config: &KernelConfig) -> Field {
    let mut field = Field::new();
    let spread = config.max_dist * 2.0;
    let mut state = seed;

    for i in 0..blades {
        state = splitmix64(state);
        let x = (unit(state) - 0.5) * spread;
        state = splitmix64(state);
        let z = (unit(state) - 0.5) * spread;
        state = splitmix64(state);
        let sway = 0.5 + unit(state);

        let data = BladeData {
            position: Vec3::new(x, 0.0, z),
            sway_duration: sway,
            // One blade in eight is scenery that never relocates
            dynamic: i % 8 != 0,
            ..BladeData::default()
        };
        field.spawn(data);
    }

    for j in 0..colliders {
        state = splitmix64(state);
        let angle = unit(state) * std::f32::consts::TAU;
        state = splitmix64(state);
        let dist = unit(state) * config.max_dist;
        let center = Vec3::new(angle.cos() * dist, 0.0, angle.sin() * dist);
        if j % 2 == 0 {
            field.add_collider(Collider::Box {
                center,
                half_extents: Vec3::new(1.5, 2.0, 1.5),
            });
        } else {
            field.add_collider(Collider::Sphere {
                center,
                radius: 1.5,
            });
        }
    }

    tracing::debug!(
        blades = field.blade_count(),
        colliders = field.colliders().len(),
        "field scattered"
    );
    field
}

/// Splitmix64 — a fast deterministic PRNG step, good enough for scatter.
fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Map the high bits of a u64 to a float in [0, 1).
fn unit(bits: u64) -> f32 {
    (bits >> 40) as f32 / (1u64 << 24) as f32
}
