use coalition_shapley::{CharacteristicValues, ShapleyInput, error::Result, generate_coalitions};

#[derive(Clone)]
struct Company {
    id: &'static str,
    revenue: f64,
}

fn main() -> Result<()> {
    let companies = [
        Company {
            id: "A",
            revenue: 418_000_000.0,
        },
        Company {
            id: "B",
            revenue: 74_200_000.0,
        },
        Company {
            id: "C",
            revenue: 28_800_000.0,
        },
    ];

    // Each coalition earns the combined revenue of its members
    let revenues: Vec<f64> = companies.iter().map(|c| c.revenue).collect();
    let values = CharacteristicValues::additive(&revenues)?;

    for coalition in generate_coalitions(&companies) {
        let ids: Vec<&str> = coalition.iter().map(|c| c.id).collect();
        let total: f64 = coalition.iter().map(|c| c.revenue).sum();
        println!("{{{}}} = {total}", ids.join(", "));
    }

    let input = ShapleyInput::from(values);
    println!(" Input: {:?}", input.characteristic_values);

    for sv in input.compute()? {
        println!(
            "Company: {}, Shapley: {}, Percent: {:.2}%",
            companies[sv.player.index()].id,
            sv.value,
            sv.proportion * 100.0
        );
    }

    Ok(())
}
