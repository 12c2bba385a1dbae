//! Hero carousel playback.

use std::time::Duration;

use anyhow::Result;
use dulce_storefront::{Carousel, HeroSlider};
use serde::Serialize;
use tokio::time::{sleep_until, Instant};

use super::SlidesArgs;
use crate::context::Context;

/// Slack after each period so the slider's own timer has fired.
const TICK_MARGIN: Duration = Duration::from_millis(25);

#[derive(Serialize)]
struct Frame {
    tick: u32,
    slide: usize,
    slides: usize,
}

/// Run the slides command.
pub async fn run(args: SlidesArgs, ctx: &Context) -> Result<()> {
    let mut config = ctx.config.carousel.clone();
    if let Some(count) = args.count {
        config.slides = count;
    }
    if let Some(ms) = args.interval_ms {
        config.interval_ms = ms.max(1);
    }

    let slider = HeroSlider::start(Carousel::new(config.slides)?, config.interval());
    ctx.output.header(&format!(
        "Carrusel: {} diapositivas cada {} ms",
        slider.len(),
        config.interval_ms
    ));
    show(ctx, 0, &slider);

    let start = Instant::now();
    for tick in 1..=args.ticks {
        let deadline = start + config.interval() * tick + TICK_MARGIN;
        tokio::select! {
            _ = sleep_until(deadline) => show(ctx, tick, &slider),
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    Ok(())
}

fn show(ctx: &Context, tick: u32, slider: &HeroSlider) {
    let frame = Frame {
        tick,
        slide: slider.current(),
        slides: slider.len(),
    };
    if ctx.output.is_json() {
        ctx.output.json(&frame);
        return;
    }
    ctx.output.list_item(&format!(
        "{}  {}/{}",
        indicators(frame.slide, frame.slides),
        frame.slide + 1,
        frame.slides
    ));
}

/// Dot indicators with the current slide filled.
fn indicators(current: usize, len: usize) -> String {
    (0..len)
        .map(|i| if i == current { "●" } else { "○" })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicators() {
        assert_eq!(indicators(1, 3), "○ ● ○");
        assert_eq!(indicators(0, 1), "●");
    }
}
