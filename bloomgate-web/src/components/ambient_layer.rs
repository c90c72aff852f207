use bloomgate_core::{AmbientView, ParticleShape};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub particles: Vec<AmbientView>,
}

fn particle_style(p: &AmbientView) -> String {
    format!(
        "left:{left:.2}%;animation-delay:{delay:.2}s;animation-duration:{duration:.2}s;\
         --scale:{scale};--blur:{blur}px;--peak:{peak};--sway:{sway}px;z-index:{z};",
        left = p.left_pct,
        delay = p.delay_s,
        duration = p.duration_s,
        scale = p.scale,
        blur = p.layer.blur_px(),
        peak = p.layer.peak_opacity(),
        sway = p.layer.sway_px(),
        z = p.layer.z_index(),
    )
}

const fn glyph(shape: ParticleShape) -> &'static str {
    match shape {
        ParticleShape::Heart => "❤",
        ParticleShape::Petal => "❀",
    }
}

/// Falling hearts and petals behind every scene.
#[function_component(AmbientLayer)]
pub fn ambient_layer(p: &Props) -> Html {
    html! {
        <div class="ambient-layer" aria-hidden="true">
            { for p.particles.iter().map(|particle| {
                let class = classes!(
                    "ambient",
                    format!("ambient--{}", particle.layer.as_str()),
                    match particle.shape {
                        ParticleShape::Heart => "ambient--heart",
                        ParticleShape::Petal => "ambient--petal",
                    },
                );
                html! {
                    <span key={particle.id} {class} style={particle_style(particle)}>
                        { glyph(particle.shape) }
                    </span>
                }
            }) }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bloomgate_core::DepthLayer;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn renders_one_span_per_particle_with_layer_hints() {
        let particles = vec![
            AmbientView {
                id: 0,
                left_pct: 12.5,
                delay_s: -3.0,
                duration_s: 21.0,
                scale: 0.5,
                layer: DepthLayer::Far,
                shape: ParticleShape::Heart,
            },
            AmbientView {
                id: 1,
                left_pct: 80.0,
                delay_s: 1.0,
                duration_s: 11.0,
                scale: 1.2,
                layer: DepthLayer::Near,
                shape: ParticleShape::Petal,
            },
        ];
        let html = block_on(LocalServerRenderer::<AmbientLayer>::with_props(Props { particles }).render());
        assert_eq!(html.matches("class=\"ambient ").count(), 2);
        assert!(html.contains("ambient--far"));
        assert!(html.contains("ambient--petal"));
        assert!(html.contains("left:12.50%"));
        assert!(html.contains("--blur:2px"));
    }
}
