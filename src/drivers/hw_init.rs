//! One-shot hardware peripheral initialization and raw pin access.
//!
//! Configures the ADC channel, relay output pins, and the DHT data line
//! using raw ESP-IDF sys calls. Called once from `main()` before the
//! control loop starts. On non-espidf targets every helper is a
//! simulation stub so the library builds and tests on the host.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

use crate::error::SensorError;
#[cfg(target_os = "espidf")]
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    GpioConfigFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc) => write!(f, "ADC1 init failed (rc={})", rc),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
        }
    }
}

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the control loop; single-threaded.
    unsafe {
        init_adc()?;
        init_gpio_outputs()?;
        init_dht_gpio()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

/// ADC1 channel wired to the soil probe (GPIO 34 on classic ESP32).
pub const ADC1_CH_SOIL: u32 = 6;

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only from the single-threaded init path or the
/// main-loop ADC read path. No concurrent access is possible because
/// `init_adc()` completes before the control loop starts.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcInitFailed(ret));
    }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };
    let ret = unsafe { adc_oneshot_config_channel(adc1_handle(), ADC1_CH_SOIL, &chan_cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcInitFailed(ret));
    }

    info!("hw_init: ADC1 configured (CH{}=soil)", ADC1_CH_SOIL);
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> Result<u16, SensorError> {
    let mut raw: i32 = 0;
    // SAFETY: ADC1_HANDLE is written once during init_adc() before this
    // function is called; single-threaded main-loop access guaranteed.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return Err(SensorError::AdcReadFailed);
    }
    Ok(raw.max(0) as u16)
}

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read(_channel: u32) -> Result<u16, SensorError> {
    Err(SensorError::AdcReadFailed)
}

// ── GPIO outputs (relays) ─────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<(), HwInitError> {
    let output_pins = [
        pins::PUMP_RELAY_GPIO,
        pins::FAN_RELAY_GPIO,
        pins::LIGHT_RELAY_GPIO,
    ];

    for &pin in &output_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
        // Released level depends on relay polarity; drivers re-assert on
        // construction, this just avoids a floating pin during boot.
        unsafe { gpio_set_level(pin, u32::from(pins::RELAY_ACTIVE_LOW)) };
    }

    info!("hw_init: relay outputs configured");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin;
    // pin was validated during init_gpio_outputs(). Main-loop only.
    unsafe {
        gpio_set_level(pin, u32::from(high));
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}

// ── DHT single-wire transfer ──────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_dht_gpio() -> Result<(), HwInitError> {
    // Open-drain with the external pull-up: the line idles high and both
    // sides can pull it low.
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::DHT_GPIO,
        mode: gpio_mode_t_GPIO_MODE_INPUT_OUTPUT_OD,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::GpioConfigFailed(ret));
    }
    unsafe { gpio_set_level(pins::DHT_GPIO, 1) };
    Ok(())
}

/// Wait (spinning) until the line reaches `level`, up to `timeout_us`.
/// Returns the microseconds spent waiting, or Err on timeout.
#[cfg(target_os = "espidf")]
fn dht_wait_level(gpio: i32, level: bool, timeout_us: u32) -> Result<u32, SensorError> {
    // SAFETY: esp_timer_get_time and gpio_get_level are register reads.
    let start = unsafe { esp_timer_get_time() };
    loop {
        let now = unsafe { esp_timer_get_time() };
        let waited = (now - start) as u32;
        if waited > timeout_us {
            return Err(SensorError::BusTimeout);
        }
        if (unsafe { gpio_get_level(gpio) } != 0) == level {
            return Ok(waited);
        }
    }
}

/// Execute one DHT11 transfer: 18 ms start pulse, sensor response, then
/// 40 data bits timed by high-pulse width. Returns the four data bytes
/// with the checksum already verified.
#[cfg(target_os = "espidf")]
pub fn dht_read(gpio: i32) -> Result<[u8; 4], SensorError> {
    // SAFETY: all calls below are level/timer register accesses on the
    // already-configured open-drain pin; main-loop only.
    unsafe {
        // Host start signal: pull low ≥18 ms, then release.
        gpio_set_level(gpio, 0);
        esp_rom_delay_us(18_000);
        gpio_set_level(gpio, 1);
    }

    // Sensor response: ~80 µs low, ~80 µs high.
    dht_wait_level(gpio, false, 80)?;
    dht_wait_level(gpio, true, 100)?;
    dht_wait_level(gpio, false, 100)?;

    // 40 bits: each is 50 µs low + high pulse (26–28 µs = 0, 70 µs = 1).
    let mut bytes = [0u8; 5];
    for i in 0..40 {
        dht_wait_level(gpio, true, 70)?;
        let high_us = dht_wait_level(gpio, false, 90)?;
        if high_us > 45 {
            bytes[i / 8] |= 1 << (7 - (i % 8));
        }
    }

    let sum = bytes[0]
        .wrapping_add(bytes[1])
        .wrapping_add(bytes[2])
        .wrapping_add(bytes[3]);
    if sum != bytes[4] {
        return Err(SensorError::ChecksumMismatch);
    }

    Ok([bytes[0], bytes[1], bytes[2], bytes[3]])
}

#[cfg(not(target_os = "espidf"))]
pub fn dht_read(_gpio: i32) -> Result<[u8; 4], SensorError> {
    Err(SensorError::BusTimeout)
}
