use bloomgate_core::{BurstGroup, BurstMember};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub bursts: Vec<BurstGroup>,
}

fn member_style(member: &BurstMember) -> String {
    let (dx, dy) = member.target_offset();
    format!(
        "--dx:{dx:.1}px;--dy:{dy:.1}px;--scale:{scale:.2};--spin:{spin:.0}deg;animation-delay:{delay:.2}s;",
        scale = member.scale,
        spin = member.spin_deg,
        delay = member.delay_s,
    )
}

/// Heart bursts spawned by taps; each group removes itself when its timer fires.
#[function_component(BurstLayer)]
pub fn burst_layer(p: &Props) -> Html {
    html! {
        <div class="burst-layer" aria-hidden="true">
            { for p.bursts.iter().map(|group| {
                let origin = format!("left:{:.0}px;top:{:.0}px;", group.origin_x, group.origin_y);
                html! {
                    <div key={group.id.0} class="burst" style={origin} data-burst={group.id.0.to_string()}>
                        { for group.members.iter().map(|member| html! {
                            <span class="burst__heart" style={member_style(member)}>{ "❤" }</span>
                        }) }
                    </div>
                }
            }) }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bloomgate_core::{BurstField, Timeline};
    use futures::executor::block_on;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use yew::LocalServerRenderer;

    #[test]
    fn renders_fourteen_hearts_per_burst() {
        let mut rng = SmallRng::seed_from_u64(4);
        let mut timeline = Timeline::<()>::new();
        let mut field = BurstField::new(2_000);
        field.spawn(40.0, 60.0, &mut rng, &mut timeline, |_| ());
        field.spawn(90.0, 10.0, &mut rng, &mut timeline, |_| ());
        let props = Props {
            bursts: field.groups().to_vec(),
        };
        let html = block_on(LocalServerRenderer::<BurstLayer>::with_props(props).render());
        assert_eq!(html.matches("burst__heart").count(), 28);
        assert!(html.contains("data-burst=\"2\""));
        assert!(html.contains("left:40px;top:60px;"));
    }
}
