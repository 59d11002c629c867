use serde::{Deserialize, Serialize};
use surreal_http::SurrealClient;

#[derive(Debug, Serialize, Deserialize)]
struct Person {
    name: String,
    age: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let db = SurrealClient::from_env().map_err(anyhow::Error::msg)?;

    let tobie = Person {
        name: "Tobie".to_owned(),
        age: 33,
    };
    let created: Option<Person> = db.create("person:tobie", &tobie).await?;
    println!("created: {created:?}");

    let everyone: Vec<Person> = db.get("person").await?;
    println!("{} person record(s)", everyone.len());

    for outcome in db
        .execute_statements("INFO FOR DB; SELECT count() FROM person GROUP ALL")
        .await?
    {
        println!("{outcome:?}");
    }

    db.delete("person:tobie").await?;
    Ok(())
}
