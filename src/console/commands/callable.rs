pub trait CallableTrait {
    fn call(&self) -> anyhow::Result<()>;
}
