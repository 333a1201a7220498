use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use std::thread;
use std::time::Duration;

use super::line::ByteLineSource;
use crate::config::SerialConfig;
use crate::error::Result;

pub type SerialLineSource = ByteLineSource<Box<dyn SerialPort>>;

/// 按配置打开串口并包装为行数据源
///
/// 打开串口会让 Arduino 复位，之后等待 `settle_delay_ms` 再开始读取
pub fn open(config: &SerialConfig) -> Result<SerialLineSource> {
    let port = serialport::new(&config.port, config.baud_rate)
        .data_bits(DataBits::Eight)
        .parity(Parity::None)
        .stop_bits(StopBits::One)
        .flow_control(FlowControl::None)
        .timeout(Duration::from_millis(config.timeout_ms))
        .open()?;

    log::info!("Opened serial port: {} at {} baud", config.port, config.baud_rate);

    if config.settle_delay_ms > 0 {
        log::info!("Waiting {}ms for the board to settle", config.settle_delay_ms);
        thread::sleep(Duration::from_millis(config.settle_delay_ms));
    }

    // 丢弃复位期间积压的半行数据
    if let Err(e) = port.clear(serialport::ClearBuffer::Input) {
        log::warn!("Failed to clear serial input buffer: {}", e);
    }

    Ok(ByteLineSource::new(port))
}

/// 列出可用串口，打开失败时帮助用户排查
pub fn available_ports() -> Vec<String> {
    match serialport::available_ports() {
        Ok(ports) => ports.into_iter().map(|p| p.port_name).collect(),
        Err(e) => {
            log::warn!("Failed to enumerate serial ports: {}", e);
            Vec::new()
        }
    }
}
