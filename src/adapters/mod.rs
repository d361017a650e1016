//! Adapters — concrete implementations of the port traits.
//!
//! | Adapter      | Implements   | Connects to                    |
//! |--------------|--------------|--------------------------------|
//! | `hardware`   | OutputPort   | PCF8574 driver, all-off guard  |
//! | `dry_run`    | OutputPort   | Log output only                |
//! | `linux_i2c`  | `I2c` (HAL)  | `/dev/i2c-N` character device  |
//! | `cancel`     | CancelPort   | `mpsc` channel                 |
//! | `signal`     | —            | SIGINT / SIGTERM → `cancel`    |
//! | `log_sink`   | EventSink    | `log` facade                   |

pub mod cancel;
pub mod dry_run;
pub mod hardware;
pub mod log_sink;

#[cfg(all(feature = "linux", target_os = "linux"))]
pub mod linux_i2c;
#[cfg(all(feature = "linux", unix))]
pub mod signal;
