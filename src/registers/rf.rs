//! RF-related registers
//!
//! This module contains registers related to RF configuration including:
//! - Frequency synthesizer word and charge pump
//! - Intermediate frequency and channel number
//! - Modulation, data rate and frequency deviation
//! - Channel filter bandwidth
//! - Power amplifier levels and configuration
//! - Crystal oscillator and SMPS settings
//! - RSSI level

use crate::field::Field;

byte_register! {
    /// SYNT3 register (address: 0x05)
    ///
    /// Holds the charge pump current, the band select bit and the four most
    /// significant bits of the 28-bit synthesizer word.
    Synt3 @ 0x05u8
}

impl Synt3 {
    /// PLL charge pump current selection
    pub const PLL_CP_ISEL: Field = Field::new(5, 3);
    /// Band select: 0 = high band (B = 4), 1 = middle band (B = 8)
    pub const BS: Field = Field::new(4, 1);
    /// Synthesizer word bits [27:24]
    pub const SYNT: Field = Field::new(0, 4);

    /// Sets the charge pump current selection.
    #[must_use = "set_charge_pump returns a modified Synt3"]
    pub const fn set_charge_pump(self, isel: u8) -> Self {
        Self::new(Self::PLL_CP_ISEL.set(self.val, isel))
    }

    /// Selects the high band (BS = 0) or the middle band (BS = 1).
    #[must_use = "set_middle_band returns a modified Synt3"]
    pub const fn set_middle_band(self, middle: bool) -> Self {
        Self::new(Self::BS.set(self.val, middle as u8))
    }

    /// Sets the four most significant bits of the synthesizer word.
    #[must_use = "set_synt_msb returns a modified Synt3"]
    pub const fn set_synt_msb(self, synt: u32) -> Self {
        Self::new(Self::SYNT.set(self.val, (synt >> 24) as u8))
    }
}

byte_register! {
    /// SYNT2 register (address: 0x06), synthesizer word bits [23:16]
    Synt2 @ 0x06u8
}

byte_register! {
    /// SYNT1 register (address: 0x07), synthesizer word bits [15:8]
    Synt1 @ 0x07u8
}

byte_register! {
    /// SYNT0 register (address: 0x08), synthesizer word bits [7:0]
    Synt0 @ 0x08u8
}

byte_register! {
    /// IF_OFFSET_ANA register (address: 0x09)
    ///
    /// Analog intermediate frequency. Only needs reprogramming when the
    /// crystal runs below 48 MHz.
    IfOffsetAna @ 0x09u8
}

impl IfOffsetAna {
    /// 300 kHz intermediate frequency for the low crystal range
    pub const IF_300KHZ_LOW_RANGE: Self = Self::new(0xB8);
}

byte_register! {
    /// CHNUM register (address: 0x0D), channel number added to the base frequency
    Chnum @ 0x0Du8
}

byte_register! {
    /// MOD4 register (address: 0x0E), data rate mantissa bits [15:8]
    Mod4 @ 0x0Eu8
}

byte_register! {
    /// MOD3 register (address: 0x0F), data rate mantissa bits [7:0]
    Mod3 @ 0x0Fu8
}

byte_register! {
    /// MOD2 register (address: 0x10)
    ///
    /// Shared between the modulation type and the data rate exponent.
    Mod2 @ 0x10u8
}

impl Mod2 {
    /// Modulation type
    pub const MOD_TYPE: Field = Field::new(4, 4);
    /// Data rate exponent
    pub const DATARATE_E: Field = Field::new(0, 4);

    /// Sets the modulation type.
    #[must_use = "set_modulation returns a modified Mod2"]
    pub const fn set_modulation(self, modulation: Modulation) -> Self {
        Self::new(Self::MOD_TYPE.set(self.val, modulation as u8))
    }

    /// Sets the data rate exponent.
    #[must_use = "set_datarate_exponent returns a modified Mod2"]
    pub const fn set_datarate_exponent(self, e: u8) -> Self {
        Self::new(Self::DATARATE_E.set(self.val, e))
    }
}

byte_register! {
    /// MOD1 register (address: 0x11)
    ///
    /// The upper nibble holds interpolation and 4-FSK mapping controls that
    /// this driver leaves untouched.
    Mod1 @ 0x11u8
}

impl Mod1 {
    /// Interpolation enables and 4-FSK constellation mapping
    pub const INTERP_AND_MAP: Field = Field::new(4, 4);
    /// Frequency deviation exponent
    pub const FDEV_E: Field = Field::new(0, 4);

    /// Sets the frequency deviation exponent.
    #[must_use = "set_deviation_exponent returns a modified Mod1"]
    pub const fn set_deviation_exponent(self, e: u8) -> Self {
        Self::new(Self::FDEV_E.set(self.val, e))
    }
}

byte_register! {
    /// MOD0 register (address: 0x12), frequency deviation mantissa
    Mod0 @ 0x12u8
}

byte_register! {
    /// CHFLT register (address: 0x13), channel filter mantissa and exponent
    Chflt @ 0x13u8
}

impl Chflt {
    /// Channel filter mantissa
    pub const CHFLT_M: Field = Field::new(4, 4);
    /// Channel filter exponent
    pub const CHFLT_E: Field = Field::new(0, 4);

    /// Builds the register from a mantissa/exponent pair.
    pub const fn from_setting(setting: MantissaExponent) -> Self {
        let val = Self::CHFLT_M.set(0, setting.mantissa as u8);
        Self::new(Self::CHFLT_E.set(val, setting.exponent))
    }
}

byte_register! {
    /// ANT_SELECT_CONF register (address: 0x1F)
    ///
    /// Equalization, carrier-sense blanking and antenna switching controls.
    AntSelectConf @ 0x1Fu8
}

impl AntSelectConf {
    /// Equalization control
    pub const EQU_CTRL: Field = Field::new(5, 2);
    /// Carrier-sense blanking
    pub const CS_BLANKING: Field = Field::new(4, 1);
    /// Antenna switching control
    pub const AS_CTRL: Field = Field::new(2, 2);

    /// Clears equalization, carrier-sense blanking and antenna switching.
    #[must_use = "disable_equa_cs_ant_switch returns a modified AntSelectConf"]
    pub const fn disable_equa_cs_ant_switch(self) -> Self {
        let val = Self::EQU_CTRL.set(self.val, 0);
        let val = Self::CS_BLANKING.set(val, 0);
        Self::new(Self::AS_CTRL.set(val, 0))
    }
}

byte_register! {
    /// PA_POWER1 register (address: 0x61), output level of PA slot 1
    PaPower1 @ 0x61u8
}

impl PaPower1 {
    /// Power level of slot 1
    pub const PA_LEVEL: Field = Field::new(0, 7);

    /// Sets the power level of slot 1.
    #[must_use = "set_level returns a modified PaPower1"]
    pub const fn set_level(self, level: u8) -> Self {
        Self::new(Self::PA_LEVEL.set(self.val, level))
    }
}

byte_register! {
    /// PA_POWER0 register (address: 0x62)
    ///
    /// Reset value 0x00 selects slot 0 with smoothing, max-dBm and ramping
    /// all disabled.
    PaPower0 @ 0x62u8
}

impl PaPower0 {
    /// Digital smoothing enable
    pub const DIG_SMOOTH_EN: Field = Field::new(7, 1);
    /// Maximum output power enable
    pub const PA_MAXDBM: Field = Field::new(6, 1);
    /// Power ramping enable
    pub const PA_RAMP_EN: Field = Field::new(5, 1);
    /// Ramp step length
    pub const PA_RAMP_STEP_LEN: Field = Field::new(3, 2);
    /// Final power slot index
    pub const PA_LEVEL_MAX_IDX: Field = Field::new(0, 3);

    /// Ramping disabled, slot 0 selected.
    pub const NO_RAMP: Self = Self::new(0x00);
}

byte_register! {
    /// PA_CONFIG1 register (address: 0x63)
    PaConfig1 @ 0x63u8
}

impl PaConfig1 {
    /// FIR filter enable (used for GFSK/ASK shaping)
    pub const FIR_EN: Field = Field::new(1, 1);

    /// Enables or disables the FIR filter.
    #[must_use = "set_fir returns a modified PaConfig1"]
    pub const fn set_fir(self, enabled: bool) -> Self {
        Self::new(Self::FIR_EN.set(self.val, enabled as u8))
    }
}

byte_register! {
    /// SYNTH_CONFIG2 register (address: 0x65)
    SynthConfig2 @ 0x65u8
}

impl SynthConfig2 {
    /// PLL phase-frequency detector split enable
    pub const PLL_PFD_SPLIT_EN: Field = Field::new(2, 1);

    /// Enables or disables the PFD split.
    #[must_use = "set_pfd_split returns a modified SynthConfig2"]
    pub const fn set_pfd_split(self, enabled: bool) -> Self {
        Self::new(Self::PLL_PFD_SPLIT_EN.set(self.val, enabled as u8))
    }
}

byte_register! {
    /// XO_RCO_CONF1 register (address: 0x6C)
    ///
    /// Only the digital clock divider is programmed; the remaining bits are
    /// written with their documented defaults.
    XoRcoConf1 @ 0x6Cu8
}

impl XoRcoConf1 {
    /// Digital clock divider power-down
    pub const PD_CLKDIV: Field = Field::new(4, 1);
    /// Default value of the bits outside `PD_CLKDIV`
    pub const DEFAULTS: u8 = 0x2E;

    /// Value for the given crystal frequency: the divider is disabled for
    /// crystals below `high_range_threshold_hz`.
    pub const fn for_crystal(xo_hz: u32, high_range_threshold_hz: u32) -> Self {
        let low_range = xo_hz < high_range_threshold_hz;
        Self::new(Self::PD_CLKDIV.set(Self::DEFAULTS, low_range as u8))
    }
}

byte_register! {
    /// XO_RCO_CONF0 register (address: 0x6D)
    XoRcoConf0 @ 0x6Du8
}

impl XoRcoConf0 {
    /// External reference: 0 = crystal, 1 = TCXO
    pub const EXT_REF: Field = Field::new(7, 1);
    /// Oscillator transconductance at startup
    pub const GM_CONF: Field = Field::new(4, 3);
    /// Reference divider
    pub const REFDIV: Field = Field::new(3, 1);
    /// External RCO oscillator
    pub const EXT_RCO_OSC: Field = Field::new(1, 1);
    /// RCO calibration
    pub const RCO_CALIBRATION: Field = Field::new(0, 1);

    /// RFDIV and REFDIV cleared, external RCO off, reference per `oscillator`.
    pub const fn for_oscillator(oscillator: Oscillator) -> Self {
        let val = Self::GM_CONF.set(0, 0b011);
        let tcxo = matches!(oscillator, Oscillator::Tcxo);
        Self::new(Self::EXT_REF.set(val, tcxo as u8))
    }
}

byte_register! {
    /// PM_CONF3 register (address: 0x76), SMPS divider
    PmConf3 @ 0x76u8
}

byte_register! {
    /// PM_CONF2 register (address: 0x77), SMPS switching frequency
    PmConf2 @ 0x77u8
}

byte_register! {
    /// RSSI_LEVEL register (address: 0xA2)
    ///
    /// RSSI captured at the end of sync word detection, offset by 146 dB.
    RssiLevel @ 0xA2u8
}

/// Modulation schemes (MOD2 bits 7:4)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Modulation {
    /// 2-FSK
    Fsk2 = 0x0,
    /// 4-FSK
    Fsk4 = 0x1,
    /// 2-GFSK, BT = 1
    Gfsk2Bt1 = 0x2,
    /// 4-GFSK, BT = 1
    Gfsk4Bt1 = 0x3,
    /// ASK/OOK
    AskOok = 0x5,
    /// Polar mode, used for Sigfox DBPSK uplinks
    Polar = 0x6,
    /// Unmodulated carrier
    Unmodulated = 0x7,
    /// 2-GFSK, BT = 0.5
    Gfsk2Bt05 = 0xA,
    /// 4-GFSK, BT = 0.5
    Gfsk4Bt05 = 0xB,
}

/// Reference oscillator type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Oscillator {
    /// Quartz crystal
    Quartz,
    /// Temperature compensated crystal oscillator
    Tcxo,
}

/// Mantissa/exponent pair used by the data rate, deviation and channel
/// filter fields.
///
/// The mantissa is 16 bits wide for the data rate, 8 bits for the deviation
/// and 4 bits for the channel filter. Computing the pair for a given physical
/// value is up to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MantissaExponent {
    /// Mantissa
    pub mantissa: u16,
    /// Exponent (0-15)
    pub exponent: u8,
}

/// SMPS divider and switching frequency pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SmpsSetting {
    /// PM_CONF3 value
    pub pm_conf3: u8,
    /// PM_CONF2 value
    pub pm_conf2: u8,
}

impl SmpsSetting {
    /// Setting used during transmission
    pub const TX: Self = Self {
        pm_conf3: 0x9C,
        pm_conf2: 0x28,
    };
    /// Setting used during reception
    pub const RX: Self = Self {
        pm_conf3: 0x87,
        pm_conf2: 0xFC,
    };
}
