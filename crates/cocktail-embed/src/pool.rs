use anyhow::{anyhow, ensure, Result};
use candle_core::{DType, Tensor};

/// Averages `hidden` ([B,T,H]) over the tokens whose `attention_mask` ([B,T])
/// is set, then scales every row to unit length. Returns [B,H].
pub fn masked_mean_l2(hidden: &Tensor, attention_mask: &Tensor) -> Result<Tensor> {
    let (batch, _tokens, width) =
        hidden.dims3().map_err(|_| anyhow!("hidden states must be [B,T,H], got {:?}", hidden.dims()))?;

    let weights = attention_mask.to_device(hidden.device())?.to_dtype(hidden.dtype())?.unsqueeze(2)?;
    let summed = hidden.broadcast_mul(&weights)?.sum(1)?;
    let counts = weights.sum(1)?;
    let pooled = unit_rows(&summed.broadcast_div(&counts)?)?;

    ensure!(pooled.dims() == [batch, width], "pooled shape mismatch: {:?}", pooled.dims());
    Ok(pooled)
}

fn unit_rows(rows: &Tensor) -> Result<Tensor> {
    let floor = if rows.dtype() == DType::F16 { 1e-6 } else { 1e-12 };
    let norms = rows.sqr()?.sum_keepdim(1)?.sqrt()?.affine(1.0, floor)?;
    Ok(rows.broadcast_div(&norms)?)
}
