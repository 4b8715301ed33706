use minifb::{Key, KeyRepeat, Window, WindowOptions};
use sense_base::{init_stdout_logger, logging::default_level};
use sense_stream::{SensorConfig, Session, SyntheticDevice, TickError};
use sense_view::{SideBySide, SnapshotError, take_snapshot};
use std::time::Duration;

const WIDTH: usize = 640;
const HEIGHT: usize = 480;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_stdout_logger(default_level());

    println!("Sense View");
    println!("Resolution: {}x{}", WIDTH, HEIGHT);
    println!("Controls: SPACE to start, M to switch mode, S to save a snapshot, ESC to exit");
    println!();

    let config = SensorConfig::default()
        .with_width(WIDTH)
        .with_height(HEIGHT)
        .with_wait_timeout(Duration::from_secs(2));
    let (device, color, depth) = SyntheticDevice::open(&config)?;
    let mut session = Session::new(device, color, depth, &config)?;

    let mut view = SideBySide::new(session.size());
    let size = view.size();
    let mut window = Window::new(
        "Sense View - ESC to exit",
        size.x,
        size.y,
        WindowOptions::default(),
    )?;
    window.set_target_fps(config.fps() as usize);

    let mut running = false;
    while window.is_open() && !window.is_key_down(Key::Escape) {
        if !running && window.is_key_pressed(Key::Space, KeyRepeat::No) {
            log::info!("starting capture");
            running = true;
        }
        if window.is_key_pressed(Key::M, KeyRepeat::No) {
            session.advance_mode();
        }

        let outcome = if window.is_key_pressed(Key::S, KeyRepeat::No) {
            Some(take_snapshot(&mut session, &mut view, "."))
        } else if running {
            Some(session.tick(&mut view).map_err(SnapshotError::from))
        } else {
            None
        };
        match outcome {
            Some(Ok(report)) => {
                if let Some(warp) = report.unsupported {
                    log::trace!("tick {}: {} skipped", report.tick, warp);
                }
            }
            Some(Err(SnapshotError::Tick(err @ TickError::Acquisition(_)))) => {
                log::error!("capture stopped: {}", err);
                running = false;
            }
            Some(Err(err)) => log::warn!("{}", err),
            None => {}
        }

        window.update_with_buffer(view.buffer(), size.x, size.y)?;
    }

    log::info!("exiting after {} ticks", session.ticks());
    Ok(())
}
