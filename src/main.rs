#![no_std]
#![no_main]

use cortex_m_rt::entry;
use embedded_hal::digital::v2::OutputPin;
use embedded_hal::prelude::_embedded_hal_serial_Read;
use embedded_time::rate::{Extensions, Fraction};
use embedded_time::{clock, Clock, Instant};
use panic_probe as _;

use pimoroni_pico_lipo_16mb as bsp;
use pimoroni_pico_lipo_16mb::hal;
use pimoroni_pico_lipo_16mb::pac;

use crate::hal::gpio::bank0::{Gpio0, Gpio1};
use crate::hal::gpio::{FunctionUart, Pin};
use crate::hal::pwm::Slices;
use crate::hal::uart::{self, UartPeripheral};
use crate::pac::UART0;
use bsp::hal::{clocks::init_clocks_and_plls, sio::Sio, watchdog::Watchdog, Timer};
use rc_link::config::{BAUD_RATE, SERVO_FREQUENCY};
use rc_link::rc_control::{HBridge, Link, PulseServo};
use rc_link::ControlLoop;

type Uart = UartPeripheral<uart::Enabled, UART0, (Pin<Gpio0, FunctionUart>, Pin<Gpio1, FunctionUart>)>;

/// The command link, over UART0.
struct UartLink(Uart);

impl Link for UartLink {
    fn read_byte(&mut self) -> Option<u8> {
        self.0.read().ok()
    }

    fn write_line(&mut self, line: &str) {
        self.0.write_full_blocking(line.as_bytes());
        self.0.write_full_blocking(b"\n");
    }
}

/// Microseconds since boot from the RP2040 timer.
struct TimerClock(Timer);

impl Clock for TimerClock {
    type T = u32;

    const SCALING_FACTOR: Fraction = Fraction::new(1, 1_000_000);

    fn try_now(&self) -> Result<Instant<Self>, clock::Error> {
        Ok(Instant::new(self.0.get_counter_low()))
    }
}

#[entry]
fn main() -> ! {
    let mut pac = pac::Peripherals::take().unwrap();
    let mut watchdog = Watchdog::new(pac.WATCHDOG);
    let sio = Sio::new(pac.SIO);

    // External high-speed crystal on the pico board is 12Mhz
    let external_xtal_freq_hz = 12_000_000u32;
    let clocks = init_clocks_and_plls(
        external_xtal_freq_hz,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok()
    .unwrap();

    let pins = bsp::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    // Setup UART
    let uart_pins = (
        pins.gpio0.into_mode::<FunctionUart>(),
        pins.gpio1.into_mode::<FunctionUart>(),
    );
    // Need to perform clock init before using UART or it will freeze.
    let uart = UartPeripheral::new(pac.UART0, uart_pins, &mut pac.RESETS)
        .enable(
            uart::UartConfig {
                baudrate: BAUD_RATE.Bd(),
                ..uart::common_configs::_115200_8_N_1
            },
            clocks.peripheral_clock.into(),
        )
        .unwrap();

    // LED is high while the controller runs
    let mut led_pin = pins.led.into_push_pull_output();
    led_pin.set_high().unwrap();

    // Setup PWM
    let mut pwm_slices = Slices::new(pac.PWM, &mut pac.RESETS);

    // Motor enable on gpio8, direction on gpio6/gpio7
    let motor_pwm = &mut pwm_slices.pwm4;
    motor_pwm.enable(); //must enable before configuring
    motor_pwm.channel_a.output_to(pins.gpio8);
    let mut motor = HBridge::new(
        &mut motor_pwm.channel_a,
        pins.gpio6.into_push_pull_output(),
        pins.gpio7.into_push_pull_output(),
    );

    // Steering on gpio10, elevation on gpio11
    let servo_pwm = &mut pwm_slices.pwm5;
    servo_pwm.enable();
    servo_pwm.set_div_int(64u8);
    servo_pwm.set_top((125_000_000 / 64 / SERVO_FREQUENCY.0) as u16); //50hz period
    servo_pwm.channel_a.output_to(pins.gpio10);
    servo_pwm.channel_b.output_to(pins.gpio11);
    let mut steering = PulseServo::new(&mut servo_pwm.channel_a, SERVO_FREQUENCY).unwrap();
    let mut elevation = PulseServo::new(&mut servo_pwm.channel_b, SERVO_FREQUENCY).unwrap();

    let clock = TimerClock(Timer::new(pac.TIMER, &mut pac.RESETS));

    let mut controller =
        ControlLoop::new(&mut motor, &mut steering, &mut elevation, UartLink(uart), clock).unwrap();
    controller.start().unwrap();
    controller.run()
}
