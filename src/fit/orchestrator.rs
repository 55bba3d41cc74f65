//! Parallel fit orchestration.
//!
//! One worker per channel, no shared mutable state between them, and results
//! are always assembled in canonical (red, green, blue) order no matter which
//! worker finishes first. If a worker fails, the failure is surfaced only
//! after all three have run to completion, so there is never a silent partial
//! result.

use crate::error::AppError;
use crate::fit::fitter::{fit_channel, ChannelFit};
use crate::fit::ProgressFn;
use crate::series::VideoSeries;

/// Run the three channel fit workers concurrently.
pub fn fit_all_channels(
    series: &VideoSeries,
    degree: usize,
    progress: &ProgressFn,
) -> Result<[ChannelFit; 3], AppError> {
    let results: [Result<ChannelFit, AppError>; 3] = std::thread::scope(|scope| {
        let handles = series.channels.each_ref().map(|channel_series| {
            let channel = channel_series.channel();
            scope.spawn(move || {
                fit_channel(channel_series, degree, &|done, total| {
                    progress(channel, done, total)
                })
            })
        });

        // Joining in spawn order blocks until every worker has finished or
        // failed; a panicking worker propagates its panic to the caller.
        handles.map(|handle| {
            handle
                .join()
                .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
        })
    });

    let [red, green, blue] = results;
    Ok([red?, green?, blue?])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Channel;
    use crate::fit::no_progress;
    use crate::series::ChannelSeries;
    use std::time::Duration;

    fn video(red: &[&[u8]], green: &[&[u8]], blue: &[&[u8]]) -> VideoSeries {
        VideoSeries {
            video: "test".to_string(),
            width: red.len() as u32,
            height: 1,
            channels: [
                ChannelSeries::from_sequences(Channel::Red, red),
                ChannelSeries::from_sequences(Channel::Green, green),
                ChannelSeries::from_sequences(Channel::Blue, blue),
            ],
        }
    }

    #[test]
    fn results_come_back_in_rgb_order_even_when_red_is_slow() {
        let series = video(
            &[&[10, 20, 40]],
            &[&[1, 2, 3]],
            &[&[200, 150, 100]],
        );

        // Stall the red worker through its progress callback so blue and
        // green finish first.
        let fits = fit_all_channels(&series, 2, &|channel, _, _| {
            if channel == Channel::Red {
                std::thread::sleep(Duration::from_millis(50));
            }
        })
        .unwrap();

        assert_eq!(fits[0].channel(), Channel::Red);
        assert_eq!(fits[1].channel(), Channel::Green);
        assert_eq!(fits[2].channel(), Channel::Blue);
        assert!((fits[0].coeffs()[0][0] - 5.0).abs() < 1e-6);
    }

    #[test]
    fn channels_are_independent() {
        let baseline = video(
            &[&[10, 20, 40], &[5, 5, 5]],
            &[&[9, 8, 7], &[1, 128, 255]],
            &[&[0, 0, 0], &[0, 0, 0]],
        );
        let corrupted = video(
            &[&[10, 20, 40], &[5, 5, 5]],
            &[&[9, 8, 7], &[1, 128, 255]],
            &[&[255, 3, 77], &[13, 0, 200]],
        );

        let a = fit_all_channels(&baseline, 2, &no_progress).unwrap();
        let b = fit_all_channels(&corrupted, 2, &no_progress).unwrap();

        // Corrupting blue input must leave red and green fits untouched.
        assert_eq!(a[0].coeffs(), b[0].coeffs());
        assert_eq!(a[1].coeffs(), b[1].coeffs());
        assert_ne!(a[2].coeffs(), b[2].coeffs());
    }

    #[test]
    fn empty_video_yields_three_empty_fits() {
        let series = video(&[], &[], &[]);
        let fits = fit_all_channels(&series, 2, &no_progress).unwrap();
        for (fit, channel) in fits.iter().zip(Channel::ALL) {
            assert!(fit.is_empty());
            assert_eq!(fit.channel(), channel);
        }
    }
}
