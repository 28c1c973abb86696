/// ----- STATUS MONITOR -----
/// Redraws a small status board whenever the dispatch engine publishes a
/// tick. Purely an observer: it reads the status channel and the car's
/// bounds, and the engine never waits for it.

use std::io::{stdout, Stdout, Write};
use std::sync::Arc;

use crossbeam_channel::Receiver;
use crossterm::{cursor, terminal, ExecutableCommand, Result};

use crate::car::{Car, CarStatus};

pub fn main(car: Arc<Car>, status_rx: Receiver<CarStatus>) -> Result<()> {
    let mut stdout = stdout();
    let status_size = status_size(&car);

    for _ in 0..status_size {
        writeln!(stdout)?;
    }

    for status in status_rx.iter() {
        printstatus(&mut stdout, &car, &status, status_size)?;
    }
    Ok(())
}

// Two lines per floor plus the fixed framing around both tables.
fn status_size(car: &Car) -> u16 {
    2 * (car.max_floor() - car.min_floor() + 1) as u16 + 17
}

fn printstatus(stdout: &mut Stdout, car: &Car, status: &CarStatus, status_size: u16) -> Result<()> {
    stdout.execute(cursor::MoveUp(status_size))?;
    stdout.execute(terminal::Clear(terminal::ClearType::FromCursorDown))?;

    writeln!(stdout, "+-------------------------+")?;
    writeln!(stdout, "| BUILDING                |")?;
    for floor in (car.min_floor()..=car.max_floor()).rev() {
        let marker = if status.floor == floor { "###" } else { "" };
        writeln!(stdout, "+------------+------------+")?;
        writeln!(stdout, "| {0:<10} | {1:<10} |", floor, marker)?;
    }
    writeln!(stdout, "+------------+------------+\n")?;

    writeln!(stdout, "+-------------------------+")?;
    writeln!(stdout, "| CAR                     |")?;
    writeln!(stdout, "+------------+------------+")?;
    writeln!(stdout, "| {0:<10} | {1:<10} |", "FLOOR", status.floor)?;
    writeln!(stdout, "+------------+------------+")?;
    writeln!(stdout, "| {0:<10} | {1:<10} |", "HEADING", status.heading.as_str())?;
    writeln!(stdout, "+------------+------------+")?;
    writeln!(stdout, "| {0:<10} | {1:<10} |", "WAITING UP", status.waiting_up)?;
    writeln!(stdout, "+------------+------------+")?;
    writeln!(stdout, "| {0:<10} | {1:<10} |", "WAITING DN", status.waiting_down)?;
    writeln!(stdout, "+------------+------------+")?;
    writeln!(stdout, "| {0:<10} | {1:<10} |", "RIDING", status.riding)?;
    writeln!(stdout, "+------------+------------+")?;

    Ok(())
}
