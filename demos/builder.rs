use serde_json::json;
use surreal_http::{
    CompareOperator, JsonValue, Order, Return, SetOperator, SurrealClient, SurrealError,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let db = SurrealClient::from_env().map_err(anyhow::Error::msg)?;
    let qb = db.query_builder();

    qb.update("person:jaime", &json!({ "name": "Jaime", "age": 27, "visits": 0 }))
        .returning(Return::None)
        .execute::<JsonValue>()
        .await?;

    let after: Vec<JsonValue> = qb
        .set(
            "person:jaime",
            [
                ("visits", SetOperator::Increment, json!(1)),
                ("tags", SetOperator::Assign, json!(["demo"])),
            ],
        )
        .returning(Return::After)
        .execute()
        .await?;
    println!("after set: {after:?}");

    let adults: Vec<JsonValue> = qb
        .select(["name", "age"])
        .from(["person"])
        .filter("age", CompareOperator::Ge, 18)
        .order_by("age", Order::Desc)
        .limit(10)
        .execute()
        .await?;
    println!("adults: {adults:?}");

    let missing = qb
        .select_all()
        .from(["no_such_table"])
        .filter("x", CompareOperator::Eq, 1)
        .execute::<JsonValue>()
        .await;
    match missing {
        Ok(rows) => println!("{} row(s)", rows.len()),
        Err(SurrealError::Statement { message, .. }) => eprintln!("statement rejected: {message}"),
        Err(err) => return Err(err.into()),
    }

    qb.delete("person:jaime").execute::<JsonValue>().await?;
    Ok(())
}
