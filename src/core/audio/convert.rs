//! Stateless PCM conversion routines.
//!
//! The resamplers here are intentionally simple (decimation/duplication and
//! linear interpolation); sample-accurate quality is a non-goal. All functions
//! are total over well-formed even-length input, and a trailing incomplete
//! sample on malformed input is ignored rather than read out of bounds.

use std::io::Cursor;

/// Sample rate of the microphone capture stage (Hz).
pub const CAPTURE_SAMPLE_RATE: u32 = 48_000;

/// Sample rate of the network transport stage (Hz).
pub const TRANSPORT_SAMPLE_RATE: u32 = 24_000;

/// Decode little-endian 16-bit samples, ignoring a trailing odd byte.
fn to_samples(data: &[u8]) -> Vec<i16> {
    data.chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect()
}

/// Encode samples back to little-endian bytes.
fn to_bytes(samples: &[i16]) -> Vec<u8> {
    let mut out = Vec::with_capacity(samples.len() * 2);
    for sample in samples {
        out.extend_from_slice(&sample.to_le_bytes());
    }
    out
}

/// Resample PCM data between arbitrary rates using linear interpolation.
///
/// For each output index `i` the source position is `i * src_rate / dst_rate`;
/// positions past the last source sample clamp to it, otherwise the two
/// bracketing samples are interpolated by the fractional offset. Rates within
/// 1.0 Hz of each other are treated as equal and the input is returned
/// unchanged; a zero rate on either side is likewise a passthrough, never a
/// panic.
pub fn resample(data: &[u8], src_rate: u32, dst_rate: u32) -> Vec<u8> {
    if src_rate == 0 || dst_rate == 0 {
        return data.to_vec();
    }
    if (src_rate as f64 - dst_rate as f64).abs() < 1.0 {
        return data.to_vec();
    }

    let src = to_samples(data);
    if src.is_empty() {
        return Vec::new();
    }

    let out_len = (src.len() as u64 * dst_rate as u64 / src_rate as u64) as usize;
    let step = src_rate as f64 / dst_rate as f64;
    let mut out = Vec::with_capacity(out_len);
    for i in 0..out_len {
        let pos = i as f64 * step;
        let idx = pos as usize;
        let sample = if idx + 1 >= src.len() {
            src[src.len() - 1]
        } else {
            let frac = pos - idx as f64;
            let a = src[idx] as f64;
            let b = src[idx + 1] as f64;
            (a + (b - a) * frac).round() as i16
        };
        out.push(sample);
    }
    to_bytes(&out)
}

/// Halve the sample rate by keeping every other sample (48kHz → 24kHz fast
/// path).
pub fn decimate_by_two(data: &[u8]) -> Vec<u8> {
    let samples = to_samples(data);
    let kept: Vec<i16> = samples.iter().copied().step_by(2).collect();
    to_bytes(&kept)
}

/// Double the sample rate by repeating every sample twice (24kHz → 48kHz fast
/// path).
pub fn duplicate_by_two(data: &[u8]) -> Vec<u8> {
    let samples = to_samples(data);
    let mut out = Vec::with_capacity(samples.len() * 2);
    for sample in samples {
        out.push(sample);
        out.push(sample);
    }
    to_bytes(&out)
}

/// Average interleaved left/right samples into a mono stream half the length.
///
/// Integer average, truncating toward zero. A trailing unpaired sample is
/// dropped.
pub fn stereo_to_mono(data: &[u8]) -> Vec<u8> {
    let samples = to_samples(data);
    let mono: Vec<i16> = samples
        .chunks_exact(2)
        .map(|pair| ((pair[0] as i32 + pair[1] as i32) / 2) as i16)
        .collect();
    to_bytes(&mono)
}

/// Normalize arbitrary supported input to canonical 16-bit mono PCM at
/// `target_rate`.
///
/// A parseable 16-bit PCM WAV container is stripped, channel-reduced and
/// resampled. Anything hound cannot parse is treated as raw PCM already in the
/// canonical format and passed through as-is (best-effort, not validated).
pub fn to_canonical_pcm(data: &[u8], target_rate: u32) -> Vec<u8> {
    let Ok(reader) = hound::WavReader::new(Cursor::new(data)) else {
        return data.to_vec();
    };

    let spec = reader.spec();
    if spec.sample_format != hound::SampleFormat::Int || spec.bits_per_sample != 16 {
        return data.to_vec();
    }

    let samples: Vec<i16> = reader.into_samples::<i16>().filter_map(Result::ok).collect();
    let mono = match spec.channels {
        1 => to_bytes(&samples),
        2 => stereo_to_mono(&to_bytes(&samples)),
        // Exotic channel layouts are not worth guessing at
        _ => return data.to_vec(),
    };
    resample(&mono, spec.sample_rate, target_rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pcm(samples: &[i16]) -> Vec<u8> {
        to_bytes(samples)
    }

    #[test]
    fn test_resample_equal_rates_passthrough() {
        let input = pcm(&[1, 2, 3, 4]);
        assert_eq!(resample(&input, 48_000, 48_000), input);
    }

    #[test]
    fn test_resample_zero_rate_is_passthrough() {
        let input = pcm(&[1, 2]);
        assert_eq!(resample(&input, 0, 24_000), input);
        assert_eq!(resample(&input, 48_000, 0), input);
        assert_eq!(resample(&input, 0, 0), input);
    }

    #[test]
    fn test_resample_halves_length() {
        let input = pcm(&[0, 100, 200, 300, 400, 500]);
        let out = resample(&input, 48_000, 24_000);
        assert_eq!(out.len(), input.len() / 2);
    }

    #[test]
    fn test_resample_round_trip_preserves_length() {
        let input = pcm(&(0..480).map(|i| (i * 50) as i16).collect::<Vec<_>>());
        let down = resample(&input, CAPTURE_SAMPLE_RATE, TRANSPORT_SAMPLE_RATE);
        let up = resample(&down, TRANSPORT_SAMPLE_RATE, CAPTURE_SAMPLE_RATE);
        assert_eq!(up.len(), input.len());

        // Linear interpolation of a linear ramp stays close to the original.
        let original = to_samples(&input);
        let restored = to_samples(&up);
        for (a, b) in original.iter().zip(&restored) {
            assert!((*a as i32 - *b as i32).abs() <= 100, "{} vs {}", a, b);
        }
    }

    #[test]
    fn test_resample_interpolates_midpoints() {
        // Upsampling 1kHz -> 2kHz lands every odd output between two inputs.
        let input = pcm(&[0, 100]);
        let out = to_samples(&resample(&input, 1_000, 2_000));
        assert_eq!(out, vec![0, 50, 100, 100]);
    }

    #[test]
    fn test_decimate_keeps_every_other_sample() {
        let input = pcm(&[10, 20, 30, 40, 50, 60]);
        assert_eq!(to_samples(&decimate_by_two(&input)), vec![10, 30, 50]);
    }

    #[test]
    fn test_duplicate_repeats_each_sample() {
        let input = pcm(&[7, -7]);
        assert_eq!(to_samples(&duplicate_by_two(&input)), vec![7, 7, -7, -7]);
    }

    #[test]
    fn test_decimate_inverts_duplicate_exactly() {
        let input = pcm(&[3, 1, 4, 1, 5, 9, 2, 6]);
        assert_eq!(decimate_by_two(&duplicate_by_two(&input)), input);
    }

    #[test]
    fn test_stereo_to_mono_averages_pairs() {
        let input = pcm(&[100, 200, -50, 50]);
        assert_eq!(to_samples(&stereo_to_mono(&input)), vec![150, 0]);
    }

    #[test]
    fn test_odd_length_input_ignores_trailing_byte() {
        let mut input = pcm(&[1, 2]);
        input.push(0xFF);
        assert_eq!(to_samples(&decimate_by_two(&input)), vec![1]);
        assert_eq!(to_samples(&duplicate_by_two(&input)), vec![1, 1, 2, 2]);
    }

    #[test]
    fn test_canonical_pcm_raw_passthrough() {
        let input = pcm(&[1, 2, 3]);
        assert_eq!(to_canonical_pcm(&input, TRANSPORT_SAMPLE_RATE), input);
    }

    #[test]
    fn test_canonical_pcm_strips_wav_container() {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: TRANSPORT_SAMPLE_RATE,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut wav = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for sample in [11i16, 22, 33] {
                wav.write_sample(sample).unwrap();
            }
            wav.finalize().unwrap();
        }

        let out = to_canonical_pcm(cursor.get_ref(), TRANSPORT_SAMPLE_RATE);
        assert_eq!(to_samples(&out), vec![11, 22, 33]);
    }

    #[test]
    fn test_canonical_pcm_downmixes_and_resamples_wav() {
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: CAPTURE_SAMPLE_RATE,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut wav = hound::WavWriter::new(&mut cursor, spec).unwrap();
            // 4 stereo frames at 48kHz
            for frame in [[100i16, 200], [300, 400], [500, 600], [700, 800]] {
                wav.write_sample(frame[0]).unwrap();
                wav.write_sample(frame[1]).unwrap();
            }
            wav.finalize().unwrap();
        }

        let out = to_canonical_pcm(cursor.get_ref(), TRANSPORT_SAMPLE_RATE);
        // 4 mono samples downmixed, then halved to 2 by resampling
        assert_eq!(to_samples(&out).len(), 2);
        assert_eq!(to_samples(&out)[0], 150);
    }
}
