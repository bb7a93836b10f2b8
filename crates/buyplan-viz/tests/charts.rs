use buyplan_core::{BuyEstimator, PhaseRow, PlanInputs, ReferenceSet, LIFESPAN_RANGE};
use buyplan_viz::{build_chart, render_ascii, render_svg, ChartKind};

#[test]
fn both_charts_render_for_every_lifespan() {
    let estimator = BuyEstimator::builtin().with_curve_samples(100).unwrap();
    for weeks in LIFESPAN_RANGE {
        let plan = estimator.evaluate(PlanInputs::new(weeks, 25).unwrap()).unwrap();
        for kind in [ChartKind::Ros, ChartKind::Comparison] {
            let chart = build_chart(kind, &plan);
            for series in &chart.series {
                for p in &series.points {
                    assert!(p.y >= chart.y_range.min && p.y <= chart.y_range.max);
                }
            }
            assert!(render_ascii(&chart, 64, 14).is_ok());
            assert!(render_svg(&chart, 640, 420).is_ok());
        }
    }
}

#[test]
fn plm_series_label_tracks_lifespan() {
    let plan = BuyEstimator::builtin()
        .with_curve_samples(10)
        .unwrap()
        .evaluate(PlanInputs::new(5, 3).unwrap())
        .unwrap();
    let chart = build_chart(ChartKind::Comparison, &plan);
    assert_eq!(chart.series.last().unwrap().label, "PLM, LS 5");

    let ros = build_chart(ChartKind::Ros, &plan);
    let axis = ros.secondary_axis.unwrap();
    assert!((axis.range.max - 3.3).abs() < 1e-9);
}

#[test]
fn custom_reference_set_stays_inside_comparison_axis() {
    let custom = ReferenceSet::new(
        vec![
            PhaseRow::new(0.1, 3.0, 0.2, 0.1),
            PhaseRow::new(0.1, 0.1, 0.1, 0.1),
        ],
        vec![12, 12],
    )
    .unwrap();
    let plan = BuyEstimator::new(&custom)
        .evaluate(PlanInputs::default())
        .unwrap();
    let chart = build_chart(ChartKind::Comparison, &plan);
    for series in &chart.series {
        for p in &series.points {
            assert!(p.y <= chart.y_range.max, "{} above {}", p.y, chart.y_range.max);
        }
    }
    let svg = render_svg(&chart, 640, 420).unwrap();
    assert_eq!(svg.matches("<polyline").count(), 3);
}
