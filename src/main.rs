use distancing::{Detection, Distancing, PostProcessorConfig};
use log::info;

fn main() -> distancing::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => PostProcessorConfig::load(path)?,
        None => PostProcessorConfig::default(),
    };
    let mut distancing = Distancing::new(&config)?;

    let frames = vec![
        vec![
            Detection::new([0.20, 0.10, 0.60, 0.18], 0.92, 0),
            Detection::new([0.22, 0.24, 0.62, 0.32], 0.88, 0),
            Detection::new([0.40, 0.70, 0.90, 0.80], 0.81, 0),
        ],
        vec![
            Detection::new([0.21, 0.12, 0.61, 0.20], 0.90, 0),
            Detection::new([0.21, 0.12, 0.61, 0.20], 0.70, 0),
            Detection::new([0.40, 0.68, 0.90, 0.78], 0.85, 0),
            Detection::new([0.00, 0.00, 1.00, 1.00], 0.40, 0),
        ],
        vec![],
        vec![Detection::new([0.42, 0.66, 0.92, 0.76], 0.83, 0)],
    ];

    for (frame_index, detections) in frames.iter().enumerate() {
        let result = distancing.process(detections);
        info!(
            "frame {frame_index}: {} objects, violations {:?}, environment score {:.3}",
            result.objects.len(),
            result.violations.pairs(),
            result.environment_score
        );
        for (object, row) in result.objects.iter().zip(result.distances.to_rows()) {
            info!(
                "  track {} (missed {} frames): distances {:?}",
                object.track_id(),
                object.disappeared(),
                row
            );
        }
    }

    Ok(())
}
