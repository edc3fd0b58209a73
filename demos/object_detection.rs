//! Camera → Object Detection Pipeline
//!
//! This demo plays the orchestration runtime: it binds two exposed
//! components through their generated tables and drives them the way a
//! foreign program would, by symbol name and handle only.
//!
//! Key concepts:
//! - Factory, trampolines and destructor per component
//! - Unchecked (`ObjectDetection`) and checked (`CameraDriver`) handles
//! - Header and manifest generated from the declarations
//!
//! Run with: RUST_LOG=info cargo run --example object_detection

use ffi_expose::components::{CameraDriver, ObjectDetection};
use ffi_expose::{ExposeError, Exposed, Instance};
use tracing_subscriber::EnvFilter;

const CYCLES: usize = 3;

fn main() -> Result<(), ExposeError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Camera → Object Detection Pipeline ===\n");

    println!("C surface:");
    print!("{}", CameraDriver::TABLE.c_header());
    print!("{}", ObjectDetection::TABLE.c_header());
    println!();

    let mut camera = Instance::<CameraDriver>::new();
    let mut detection = Instance::<ObjectDetection>::new();

    for cycle in 1..=CYCLES {
        tracing::info!(cycle, "Starting cycle");

        for step in ["read_input", "process", "write_output"] {
            camera.invoke(step)?;
        }

        detection.invoke("pre_processing")?;
        for query in ["drive_q1", "drive_q2", "drive_q3"] {
            detection.invoke(query)?;
        }
        detection.invoke("object_fusion")?;
    }

    println!("\nManifest for the orchestration runtime:");
    println!("{}", ObjectDetection::TABLE.to_json()?);

    println!("\n=== Demo Complete ===");
    Ok(())
}
