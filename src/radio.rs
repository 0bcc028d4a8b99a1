//! S2LP driver
//!
//! [`S2lp`] owns the register transport, the board pins of the radio and a
//! delay source. Every configuration step is a read-modify-write through the
//! typed registers, so bits a step does not own are left as found.
//!
//! # Lifecycle
//! ```text
//! shutdown --exit_shutdown--> READY --configure--> TX / RX --sabort--> READY
//!     ^                                                                  |
//!     +-------------------------enter_shutdown---------------------------+
//! ```
//!
//! # Example
//! ```ignore
//! use s2lp::{commands, Config, Device, S2lp, State};
//!
//! let mut radio = S2lp::new(Device::new(spi, cs), pins, delay, Config::default());
//! radio.init()?;
//! radio.tcxo(true)?;
//! radio.exit_shutdown()?;
//! radio.wait_for_oscillator()?;
//! radio.set_oscillator(Oscillator::Tcxo)?;
//! radio.set_rf_frequency(868_130_000)?;
//! radio.send_command(commands::Tx)?;
//! radio.wait_for_state(State::Tx)?;
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use regiface::Command;

use crate::config::*;
use crate::device::Device;
use crate::dma::{NoDma, TxDma};
use crate::exti::{Exti, ExtiRegisters, Trigger};
use crate::mapping;
use crate::pins::{Pin, PinControl, PinMode, Pull};
use crate::registers::*;
use crate::{Error, State};

/// Synthesizer word for a carrier frequency.
///
/// `SYNT = f_RF * 2^20 * (B / 2) * D / f_XO` with B = 4 (high band) and
/// D = 1 (reference divider off), computed in 64 bits and truncated.
pub const fn synthesizer_word(rf_frequency_hz: u32) -> u32 {
    (((rf_frequency_hz as u64) << 21) / XO_FREQUENCY_HZ as u64) as u32
}

/// Clamps an output power request and returns it with its PA level code.
pub const fn pa_level(dbm: i8) -> (i8, u8) {
    let dbm = if dbm < RF_OUTPUT_POWER_MIN_DBM {
        RF_OUTPUT_POWER_MIN_DBM
    } else if dbm > RF_OUTPUT_POWER_MAX_DBM {
        RF_OUTPUT_POWER_MAX_DBM
    } else {
        dbm
    };
    (dbm, (29 - 2 * dbm as i16) as u8)
}

/// Pull and edge of the GPIO0 interrupt line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gpio0Polarity {
    /// Pull-down, rising edge
    Uplink,
    /// Pull-up, falling edge
    Downlink,
}

/// State of the external RF switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RfPath {
    Off,
    Tx,
    Rx,
}

/// S2LP transceiver.
pub struct S2lp<SPI, CS, P, D, T = NoDma> {
    device: Device<SPI, CS>,
    pins: P,
    delay: D,
    dma: Option<T>,
    config: Config,
}

impl<SPI, CS, P, D> S2lp<SPI, CS, P, D, NoDma> {
    /// Creates a driver that writes the TX FIFO from the CPU.
    pub fn new(device: Device<SPI, CS>, pins: P, delay: D, config: Config) -> Self {
        Self {
            device,
            pins,
            delay,
            dma: None,
            config,
        }
    }
}

impl<SPI, CS, P, D, T> S2lp<SPI, CS, P, D, T> {
    /// Creates a driver that streams the TX FIFO through `dma`.
    pub fn with_dma(device: Device<SPI, CS>, pins: P, delay: D, dma: T, config: Config) -> Self {
        Self {
            device,
            pins,
            delay,
            dma: Some(dma),
            config,
        }
    }

    /// Register transport, for accesses not covered by the driver.
    pub fn device(&mut self) -> &mut Device<SPI, CS> {
        &mut self.device
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Releases the owned resources.
    pub fn release(self) -> (Device<SPI, CS>, P, D, Option<T>) {
        (self.device, self.pins, self.delay, self.dma)
    }
}

impl<SPI, CS, P, D, T> S2lp<SPI, CS, P, D, T>
where
    SPI: embedded_hal::spi::SpiBus<u8>,
    CS: OutputPin,
    P: PinControl,
    D: DelayNs,
    T: TxDma,
{
    fn configure_pin(&mut self, pin: &Pin, mode: PinMode) -> Result<(), Error> {
        self.pins.configure(pin, mode).map_err(|_| Error::Pin)
    }

    fn set_pin(&mut self, pin: &Pin, high: bool) -> Result<(), Error> {
        self.pins.set_level(pin, high).map_err(|_| Error::Pin)
    }

    /// Configures TCXO power and the RF switch pins as outputs, driven low.
    pub fn init(&mut self) -> Result<(), Error> {
        for pin in [
            mapping::TCXO_POWER_ENABLE,
            mapping::RF_TX_ENABLE,
            mapping::RF_RX_ENABLE,
        ] {
            self.configure_pin(&pin, PinMode::Output)?;
            self.set_pin(&pin, false)?;
        }
        Ok(())
    }

    /// Puts every radio pin in its lowest-leakage state.
    pub fn disable(&mut self) -> Result<(), Error> {
        for pin in [
            mapping::TCXO_POWER_ENABLE,
            mapping::S2LP_GPIO0,
            mapping::S2LP_SDN,
        ] {
            self.configure_pin(&pin, PinMode::Analog)?;
        }
        Ok(())
    }

    /// Switches the TCXO supply. Enabling waits for the oscillator to settle.
    pub fn tcxo(&mut self, enable: bool) -> Result<(), Error> {
        self.set_pin(&mapping::TCXO_POWER_ENABLE, enable)?;
        if enable {
            self.delay.delay_ms(TCXO_SETTLE_DELAY_MS);
        }
        Ok(())
    }

    /// Drives the external RF switch.
    pub fn set_rf_path(&mut self, path: RfPath) -> Result<(), Error> {
        // Break before make.
        match path {
            RfPath::Off => {
                self.set_pin(&mapping::RF_TX_ENABLE, false)?;
                self.set_pin(&mapping::RF_RX_ENABLE, false)
            }
            RfPath::Tx => {
                self.set_pin(&mapping::RF_RX_ENABLE, false)?;
                self.set_pin(&mapping::RF_TX_ENABLE, true)
            }
            RfPath::Rx => {
                self.set_pin(&mapping::RF_TX_ENABLE, false)?;
                self.set_pin(&mapping::RF_RX_ENABLE, true)
            }
        }
    }

    /// Rebinds the GPIO0 interrupt line for uplink or downlink signalling.
    ///
    /// Only the GPIO0 line of `exti` is touched; its pending flag is cleared
    /// after the change so no edge is reported for the switch itself.
    pub fn set_gpio0<E: ExtiRegisters>(
        &mut self,
        exti: &mut Exti<E>,
        polarity: Gpio0Polarity,
    ) -> Result<(), Error> {
        let (pull, trigger) = match polarity {
            Gpio0Polarity::Uplink => (Pull::Down, Trigger::Rising),
            Gpio0Polarity::Downlink => (Pull::Up, Trigger::Falling),
        };
        self.configure_pin(&mapping::S2LP_GPIO0, PinMode::Input(pull))?;
        exti.configure_gpio(&mapping::S2LP_GPIO0, trigger);
        Ok(())
    }

    /// Releases SDN; the chip pulls it up and shuts down.
    pub fn enter_shutdown(&mut self) -> Result<(), Error> {
        #[cfg(feature = "defmt")]
        defmt::trace!("s2lp: enter shutdown");

        self.configure_pin(&mapping::S2LP_SDN, PinMode::Analog)
    }

    /// Drives SDN low and waits for the chip to boot.
    pub fn exit_shutdown(&mut self) -> Result<(), Error> {
        #[cfg(feature = "defmt")]
        defmt::trace!("s2lp: exit shutdown");

        self.configure_pin(&mapping::S2LP_SDN, PinMode::Output)?;
        self.set_pin(&mapping::S2LP_SDN, false)?;
        self.delay.delay_ms(SHUTDOWN_EXIT_DELAY_MS);
        Ok(())
    }

    /// Sends a command (see [`commands`](crate::commands)).
    pub fn send_command<C>(&mut self, command: C) -> Result<(), Error>
    where
        C: Command<IdType = u8>,
    {
        #[cfg(feature = "defmt")]
        defmt::trace!("s2lp: command {=u8:#x}", C::id());

        self.device.execute_command(command)
    }

    /// Reads MC_STATE0 once.
    pub fn state(&mut self) -> Result<McState0, Error> {
        self.device.read_register()
    }

    fn poll_state<F>(&mut self, done: F) -> Result<(), Error>
    where
        F: Fn(McState0) -> bool,
    {
        for _ in 0..self.config.poll.max_attempts {
            if done(self.state()?) {
                return Ok(());
            }
        }
        Err(Error::Timeout)
    }

    /// Polls MC_STATE0 until the chip reports `target`.
    ///
    /// # Errors
    /// * `Error::Timeout` - the poll budget ran out first
    pub fn wait_for_state(&mut self, target: State) -> Result<(), Error> {
        let result = self.poll_state(|reg| reg.state_code() == target.code());

        if result.is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("s2lp: timed out waiting for {}", target);
        }

        result
    }

    /// Polls MC_STATE0 until the crystal oscillator runs.
    pub fn wait_for_oscillator(&mut self) -> Result<(), Error> {
        let result = self.poll_state(McState0::xo_on);

        if result.is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("s2lp: timed out waiting for the oscillator");
        }

        result
    }

    /// Selects crystal or TCXO reference and the digital clock divider.
    pub fn set_oscillator(&mut self, oscillator: Oscillator) -> Result<(), Error> {
        self.device
            .write_register(XoRcoConf0::for_oscillator(oscillator))?;
        self.device.write_register(XoRcoConf1::for_crystal(
            XO_FREQUENCY_HZ,
            XO_HIGH_RANGE_THRESHOLD_HZ,
        ))
    }

    /// Programs the SMPS divider and switching frequency.
    pub fn configure_smps(&mut self, setting: SmpsSetting) -> Result<(), Error> {
        self.device.write_register(PmConf3::new(setting.pm_conf3))?;
        self.device.write_register(PmConf2::new(setting.pm_conf2))
    }

    /// Charge pump current and PFD split for the reference frequency.
    pub fn configure_charge_pump(&mut self) -> Result<(), Error> {
        self.device
            .modify_register(|r: Synt3| r.set_charge_pump(0b010))?;
        let split = XO_FREQUENCY_HZ < XO_HIGH_RANGE_THRESHOLD_HZ;
        self.device
            .modify_register(|r: SynthConfig2| r.set_pfd_split(split))?;
        Ok(())
    }

    pub fn set_modulation(&mut self, modulation: Modulation) -> Result<(), Error> {
        #[cfg(feature = "defmt")]
        defmt::trace!("s2lp: modulation {}", modulation);

        self.device
            .modify_register(|r: Mod2| r.set_modulation(modulation))?;
        Ok(())
    }

    /// Tunes the synthesizer to `rf_frequency_hz` in the high band.
    ///
    /// Channel number is reset to 0. The charge pump bits of SYNT3 are kept.
    pub fn set_rf_frequency(&mut self, rf_frequency_hz: u32) -> Result<(), Error> {
        #[cfg(feature = "defmt")]
        defmt::trace!("s2lp: rf frequency {} Hz", rf_frequency_hz);

        if XO_FREQUENCY_HZ < XO_HIGH_RANGE_THRESHOLD_HZ {
            self.device.write_register(IfOffsetAna::IF_300KHZ_LOW_RANGE)?;
        }
        self.device.write_register(Chnum::new(0))?;

        let synt = synthesizer_word(rf_frequency_hz);
        self.device
            .modify_register(|r: Synt3| r.set_middle_band(false).set_synt_msb(synt))?;
        self.device.write_register(Synt2::new((synt >> 16) as u8))?;
        self.device.write_register(Synt1::new((synt >> 8) as u8))?;
        self.device.write_register(Synt0::new(synt as u8))
    }

    /// Frequency deviation, mantissa in MOD0 and exponent in MOD1[3:0].
    pub fn set_fsk_deviation(&mut self, setting: MantissaExponent) -> Result<(), Error> {
        self.device.write_register(Mod0::new(setting.mantissa as u8))?;
        self.device
            .modify_register(|r: Mod1| r.set_deviation_exponent(setting.exponent))?;
        Ok(())
    }

    /// Data rate, 16-bit mantissa in MOD4/MOD3 and exponent in MOD2[3:0].
    pub fn set_bitrate(&mut self, setting: MantissaExponent) -> Result<(), Error> {
        let [msb, lsb] = setting.mantissa.to_be_bytes();
        self.device.write_register(Mod4::new(msb))?;
        self.device.write_register(Mod3::new(lsb))?;
        self.device
            .modify_register(|r: Mod2| r.set_datarate_exponent(setting.exponent))?;
        Ok(())
    }

    /// Configures one of the four chip GPIOs and selects whose FIFO flags
    /// are exported.
    pub fn configure_gpio(
        &mut self,
        pin: GpioPin,
        mode: GpioMode,
        function: GpioFunction,
        fifo_flags: FifoFlagDirection,
    ) -> Result<(), Error> {
        let address = pin.conf_address();
        let conf = GpioConf::new(self.device.read_raw(address)?).configure(mode, function);
        self.device.write_raw(address, conf.raw())?;
        self.device
            .modify_register(|r: Protocol2| r.set_fifo_flags(fifo_flags))?;
        Ok(())
    }

    /// Sets a FIFO threshold, clamped to 127 bytes.
    ///
    /// Returns the value actually programmed.
    pub fn set_fifo_threshold(&mut self, threshold: FifoThreshold, value: u8) -> Result<u8, Error> {
        let value = value.min(FIFO_THRESHOLD.max());
        let address = threshold.address();
        let reg = self.device.read_raw(address)?;
        self.device
            .write_raw(address, FIFO_THRESHOLD.set(reg, value))?;
        Ok(value)
    }

    /// Enables or disables one interrupt source.
    pub fn configure_irq(&mut self, index: IrqIndex, enable: bool) -> Result<(), Error> {
        let address = index.mask_address();
        let bit = index.mask_bit();
        let reg = self.device.read_raw(address)?;
        let reg = if enable { reg | bit } else { reg & !bit };
        self.device.write_raw(address, reg)
    }

    /// Reads the four IRQ_STATUS registers. Reading clears the flags.
    pub fn irq_status(&mut self) -> Result<IrqFlags, Error> {
        let status3: IrqStatus3 = self.device.read_register()?;
        let status2: IrqStatus2 = self.device.read_register()?;
        let status1: IrqStatus1 = self.device.read_register()?;
        let status0: IrqStatus0 = self.device.read_register()?;
        Ok(IrqFlags::from_status([
            status3.raw(),
            status2.raw(),
            status1.raw(),
            status0.raw(),
        ]))
    }

    pub fn clear_irq_flags(&mut self) -> Result<(), Error> {
        self.irq_status().map(|_| ())
    }

    pub fn set_packet_length(&mut self, length: u8) -> Result<(), Error> {
        self.device.write_register(Pcktlen1::new(0))?;
        self.device.write_register(Pcktlen0::new(length))
    }

    /// Preamble detector length (in `01`/`10` pairs) and pattern.
    pub fn set_preamble_detector(
        &mut self,
        length: u8,
        pattern: PreamblePattern,
    ) -> Result<(), Error> {
        self.device
            .modify_register(|r: Pcktctrl6| r.set_preamble_len_msb(0))?;
        self.device.write_register(Pcktctrl5::new(length))?;
        self.device
            .modify_register(|r: Pcktctrl3| r.set_preamble_pattern(pattern))?;
        Ok(())
    }

    /// Programs the sync word, `sync_word[0]` first.
    ///
    /// The length is clamped to 32 bits and to the bytes supplied. Returns
    /// the length actually programmed.
    pub fn set_sync_word(&mut self, sync_word: &[u8], length_bits: u8) -> Result<u8, Error> {
        let supplied = sync_word.len().min(SYNC_WORD_MAX_BYTES) as u8 * 8;
        let bits = length_bits.min(SYNC_WORD_MAX_BITS).min(supplied);
        let bytes = usize::from(bits.div_ceil(8));

        for (i, byte) in sync_word.iter().take(bytes).enumerate() {
            self.device.write_raw(SYNC0 - i as u8, *byte)?;
        }
        self.device
            .modify_register(|r: Pcktctrl6| r.set_sync_len(bits))?;
        Ok(bits)
    }

    pub fn disable_crc(&mut self) -> Result<(), Error> {
        self.device.modify_register(|r: Pcktctrl1| r.disable_crc())?;
        Ok(())
    }

    /// No ramping, slot 0, FIR off.
    pub fn configure_pa(&mut self) -> Result<(), Error> {
        self.device.write_register(PaPower0::NO_RAMP)?;
        self.device.modify_register(|r: PaConfig1| r.set_fir(false))?;
        Ok(())
    }

    /// Sets the output power, clamped to the PA range.
    ///
    /// Returns the power actually programmed, in dBm.
    pub fn set_rf_output_power(&mut self, dbm: i8) -> Result<i8, Error> {
        let (dbm, level) = pa_level(dbm);

        #[cfg(feature = "defmt")]
        defmt::trace!("s2lp: output power {} dBm", dbm);

        self.device.modify_register(|r: PaPower1| r.set_level(level))?;
        Ok(dbm)
    }

    pub fn set_tx_source(&mut self, source: TxSource) -> Result<(), Error> {
        self.device
            .modify_register(|r: Pcktctrl1| r.set_tx_source(source))?;
        Ok(())
    }

    pub fn set_rx_source(&mut self, source: RxSource) -> Result<(), Error> {
        self.device
            .modify_register(|r: Pcktctrl3| r.set_rx_source(source))?;
        Ok(())
    }

    /// Channel filter bandwidth.
    pub fn set_rx_bandwidth(&mut self, setting: MantissaExponent) -> Result<(), Error> {
        self.device.write_register(Chflt::from_setting(setting))
    }

    pub fn disable_equa_cs_ant_switch(&mut self) -> Result<(), Error> {
        self.device
            .modify_register(|r: AntSelectConf| r.disable_equa_cs_ant_switch())?;
        Ok(())
    }

    /// RSSI latched at sync word detection, in dBm.
    pub fn get_rssi(&mut self) -> Result<i16, Error> {
        let level: RssiLevel = self.device.read_register()?;
        Ok(i16::from(level.raw()) - RSSI_OFFSET_DB)
    }

    /// Part number from DEVICE_INFO1 (0x03 on S2LP).
    pub fn part_number(&mut self) -> Result<u8, Error> {
        let info: DeviceInfo1 = self.device.read_register()?;
        Ok(info.raw())
    }

    /// Reads up to one FIFO's worth of received bytes into `buffer`.
    ///
    /// Returns the number of bytes read.
    pub fn read_fifo(&mut self, buffer: &mut [u8]) -> Result<usize, Error> {
        let length = buffer.len().min(FIFO_SIZE);
        self.device.read_fifo(&mut buffer[..length])?;
        Ok(length)
    }

    /// Writes up to one FIFO's worth of `data` to the TX FIFO.
    ///
    /// Goes through DMA when the driver was built with a streamer. Returns
    /// the number of bytes written.
    pub fn write_fifo(&mut self, data: &[u8]) -> Result<usize, Error> {
        let data = &data[..data.len().min(FIFO_SIZE)];
        match self.dma.as_mut() {
            Some(dma) => self.device.write_fifo_with(data, dma)?,
            None => self.device.write_fifo(data)?,
        }
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthesizer_word_for_sigfox_channels() {
        assert_eq!(synthesizer_word(868_000_000), 0x0235_1AAA);
        assert_eq!(synthesizer_word(869_525_000), 0x0236_18D5);
    }

    #[test]
    fn synthesizer_word_resolution() {
        // One LSB is f_XO / 2^21, about 23.4 Hz.
        for f in [868_000_000u32, 868_130_000, 869_525_000] {
            let back = ((synthesizer_word(f) as u64 * XO_FREQUENCY_HZ as u64) >> 21) as u32;
            assert!(f - back < 24);
        }
    }

    #[test]
    fn pa_level_clamps() {
        assert_eq!(pa_level(14), (14, 1));
        assert_eq!(pa_level(0), (0, 29));
        assert_eq!(pa_level(-49), (-49, 127));
        assert_eq!(pa_level(20), (14, 1));
        assert_eq!(pa_level(-128), (-49, 127));
    }

    #[test]
    fn pa_level_is_monotonic() {
        let mut previous = pa_level(RF_OUTPUT_POWER_MIN_DBM).1;
        for dbm in RF_OUTPUT_POWER_MIN_DBM + 1..=RF_OUTPUT_POWER_MAX_DBM {
            let level = pa_level(dbm).1;
            assert!(level < previous);
            previous = level;
        }
    }
}
