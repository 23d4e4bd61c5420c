use std::sync::atomic::{AtomicBool, Ordering};

use ucmd_core::{Arguments, CmdError, CmdResult};

static LED_ON: AtomicBool = AtomicBool::new(false);

pub fn pwmfreq(args: &Arguments) -> CmdResult {
    let res = args.by_designator('r').ok_or(CmdError::Generic)?.as_u8()?;
    let phase = args.by_designator('q').ok_or(CmdError::Generic)?.as_i16()?;
    let freq = args.by_designator('f').ok_or(CmdError::Generic)?.as_i32()?;
    println!("pwmfreq | resolution: {:?}, phase: {:?}, frequency: {:?}", res, phase, freq);
    Ok(())
}

pub fn pid(args: &Arguments) -> CmdResult {
    let mut gains = [0u16; 3];
    for (gain, designator) in gains.iter_mut().zip(['p', 'i', 'd']) {
        if let Some(slot) = args.by_designator(designator) {
            *gain = slot.as_u16()?.unwrap_or(0);
        }
    }
    if gains.iter().all(|g| *g == 0) {
        println!("pid | at least one gain required");
        return Err(CmdError::Generic);
    }
    println!("pid | kp: {}, ki: {}, kd: {}", gains[0], gains[1], gains[2]);
    Ok(())
}

pub fn led(args: &Arguments) -> CmdResult {
    let on = match args.by_designator('s').and_then(|s| s.value()) {
        Some(value) => value != ucmd_core::ArgValue::U8(0),
        None => !LED_ON.load(Ordering::Relaxed),
    };
    LED_ON.store(on, Ordering::Relaxed);
    println!("led | {}", if on { "ON" } else { "OFF" });
    Ok(())
}

pub fn ctrlmode(_args: &Arguments) -> CmdResult {
    println!("ctrlmode | no-args");
    Ok(())
}

pub fn offset(args: &Arguments) -> CmdResult {
    for slot in args.iter().filter(|s| s.is_valid()) {
        println!("offset | {}: {:?}", slot.descriptor().designator(), slot.value());
    }
    Ok(())
}
