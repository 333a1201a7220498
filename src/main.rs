mod app;
mod config;
mod error;
mod game;
mod history;
mod logger;
mod parser;
mod plotter;
mod render3d;
mod scene;
mod serial;
mod types;
mod utils;

use crossbeam_channel::bounded;
use dotenv::dotenv;
use eframe::egui;
use log::{error, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use app::TiltApp;
use config::{ConfigManager, WindowConfig};
use types::LinkStats;

fn main() {
    dotenv().ok(); // 加载 .env 文件
    logger::init_logger();
    info!("Application starting");

    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn native_options(window: &WindowConfig) -> eframe::NativeOptions {
    eframe::NativeOptions {
        vsync: window.vsync,
        hardware_acceleration: if window.hardware_acceleration {
            eframe::HardwareAcceleration::Preferred // 硬件加速优先模式
        } else {
            eframe::HardwareAcceleration::Off
        },
        renderer: eframe::Renderer::Glow,
        viewport: egui::ViewportBuilder::default()
            .with_title(window.title.clone())
            .with_inner_size([window.width, window.height])
            .with_resizable(window.resizable),
        ..Default::default()
    }
}

fn run() -> error::Result<()> {
    let config_manager = ConfigManager::from_env()?;
    let config = config_manager.get_config().clone();
    info!(
        "Config loaded from {}: scene '{}', port {} @ {} baud",
        config_manager.config_path().display(),
        config.scene.kind,
        config.serial.port,
        config.serial.baud_rate
    );

    let source = match serial::transport::open(&config.serial) {
        Ok(source) => source,
        Err(e) => {
            let ports = serial::transport::available_ports();
            if ports.is_empty() {
                warn!("No serial ports found");
            } else {
                warn!("Available serial ports: {}", ports.join(", "));
            }
            return Err(e);
        }
    };

    let (sample_sender, sample_receiver) = bounded(config.channels.sample_channel_capacity);
    let stats = Arc::new(LinkStats::new());
    let shutdown_signal = Arc::new(AtomicBool::new(false));

    let reader_handle = serial::spawn_reader(
        source,
        config.scene.kind.sample_format(),
        sample_sender,
        Arc::clone(&stats),
        Arc::clone(&shutdown_signal),
    )?;

    let app = TiltApp::new(config_manager, sample_receiver, stats);
    let gui_result = eframe::run_native(
        &config.window.title,
        native_options(&config.window),
        Box::new(|_cc| Ok(Box::new(app))),
    );

    // GUI 关闭后，发送关闭信号给读取线程
    info!("GUI closed, signaling reader thread to shutdown");
    shutdown_signal.store(true, Ordering::Relaxed);

    match reader_handle.join() {
        Ok(()) => info!("Reader thread shut down gracefully"),
        Err(e) => error!("Reader thread panicked: {:?}", e),
    }

    gui_result?;
    info!("Application exiting");
    Ok(())
}
